//! Schedule builder configuration.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Options for [`ScheduleBuilder`](super::ScheduleBuilder).
///
/// Deserializes with defaults for missing fields, so `{}` is a valid config.
///
/// # Example
///
/// ```
/// use league_schedule::scheduler::SchedulerConfig;
///
/// let config = SchedulerConfig::default().with_seed(42);
/// assert_eq!(config.seed, Some(42));
/// assert!(config.repair_home_clashes);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Swap home/away of a pairing whose home team shares a city with a
    /// team already on the home side of the round.
    pub repair_home_clashes: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            repair_home_clashes: true,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the RNG seed for reproducible schedules.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables the home-side clash swap.
    pub fn with_home_clash_repair(mut self, enabled: bool) -> Self {
        self.repair_home_clashes = enabled;
        self
    }

    /// Creates the RNG described by this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
