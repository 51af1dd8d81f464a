//! Configuration constants and defaults for pet care.
//!
//! [`CareConfig`] bundles every care tunable so that callers (the pet store,
//! tests, the simulation harness) can override defaults. It deserializes
//! from the `care` section of the engine YAML; any missing key falls back to
//! its default.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Convert a configured number of seconds into a [`TimeDelta`].
///
/// Values too large to represent saturate to [`TimeDelta::MAX`], which makes
/// the corresponding cooldown effectively infinite instead of wrapping.
pub fn seconds(secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

/// Affinity points granted by the care loop for each completed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareRewards {
    /// Points for feeding (default: 10).
    pub feed: u32,
    /// Points for a bath (default: 15).
    pub bath: u32,
    /// Points for resolving a toilet request inside the bonus window
    /// (default: 20).
    pub toilet_quick: u32,
    /// Points for resolving a toilet request after the bonus window
    /// (default: 10).
    pub toilet_late: u32,
    /// Points for putting the pet to sleep (default: 5).
    pub sleep: u32,
}

impl Default for CareRewards {
    fn default() -> Self {
        Self {
            feed: 10,
            bath: 15,
            toilet_quick: 20,
            toilet_late: 10,
            sleep: 5,
        }
    }
}

/// Tunables for satisfaction, cooldowns, and affinity.
///
/// Durations are whole seconds so the YAML stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareConfig {
    /// Highest satisfaction level (default: 3).
    pub satisfaction_max: u32,
    /// Seconds per one-level satisfaction decay (default: 2h).
    pub decay_unit_secs: u64,
    /// Seconds between baths (default: 8h).
    pub bath_cooldown_secs: u64,
    /// Seconds one accelerant removes from the bath cooldown (default: 4h).
    pub accelerant_shift_secs: u64,
    /// Accelerants usable per day (default: 2).
    pub accelerant_daily_cap: u32,
    /// Minimum seconds between two toilet requests (default: 1h).
    pub toilet_min_interval_secs: u64,
    /// Seconds after a toilet request during which resolving it earns the
    /// quick bonus, inclusive (default: 1h).
    pub toilet_bonus_window_secs: u64,
    /// Chance in percent that tapping the toilet raises a request
    /// (default: 20).
    pub toilet_flag_chance_percent: u32,
    /// Affinity points per reward card (default: 100).
    pub affinity_max: u32,
    /// Points granted per care action.
    pub rewards: CareRewards,
}

impl Default for CareConfig {
    fn default() -> Self {
        Self {
            satisfaction_max: 3,
            decay_unit_secs: 2 * 60 * 60,
            bath_cooldown_secs: 8 * 60 * 60,
            accelerant_shift_secs: 4 * 60 * 60,
            accelerant_daily_cap: 2,
            toilet_min_interval_secs: 60 * 60,
            toilet_bonus_window_secs: 60 * 60,
            toilet_flag_chance_percent: 20,
            affinity_max: 100,
            rewards: CareRewards::default(),
        }
    }
}

impl CareConfig {
    /// Duration of one satisfaction decay step.
    pub fn decay_unit(&self) -> TimeDelta {
        seconds(self.decay_unit_secs)
    }

    /// Bath cooldown duration.
    pub fn bath_cooldown(&self) -> TimeDelta {
        seconds(self.bath_cooldown_secs)
    }

    /// Cooldown removed by one accelerant.
    pub fn accelerant_shift(&self) -> TimeDelta {
        seconds(self.accelerant_shift_secs)
    }

    /// Minimum spacing between toilet requests.
    pub fn toilet_min_interval(&self) -> TimeDelta {
        seconds(self.toilet_min_interval_secs)
    }

    /// Toilet quick-response bonus window.
    pub fn toilet_bonus_window(&self) -> TimeDelta {
        seconds(self.toilet_bonus_window_secs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = CareConfig::default();
        assert_eq!(cfg.satisfaction_max, 3);
        assert_eq!(cfg.decay_unit(), TimeDelta::hours(2));
        assert_eq!(cfg.bath_cooldown(), TimeDelta::hours(8));
        assert_eq!(cfg.accelerant_shift(), TimeDelta::hours(4));
        assert_eq!(cfg.accelerant_daily_cap, 2);
        assert_eq!(cfg.toilet_bonus_window(), TimeDelta::hours(1));
        assert_eq!(cfg.toilet_flag_chance_percent, 20);
        assert_eq!(cfg.affinity_max, 100);
        assert_eq!(cfg.rewards.toilet_quick, 20);
        assert_eq!(cfg.rewards.sleep, 5);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "decay_unit_secs: 60\nrewards:\n  feed: 12\n";
        let cfg: CareConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(cfg.decay_unit(), TimeDelta::minutes(1));
        assert_eq!(cfg.rewards.feed, 12);
        assert_eq!(cfg.rewards.bath, 15);
        assert_eq!(cfg.bath_cooldown_secs, 8 * 60 * 60);
    }

    #[test]
    fn huge_durations_saturate() {
        assert_eq!(seconds(u64::MAX), TimeDelta::MAX);
    }
}
