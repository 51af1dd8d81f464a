//! Configuration for the daily shop and egg economy.

use calpet_care::config::seconds;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Shop and egg tunables, deserialized from the `shop` section of the engine
/// YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Items in each daily line-up (default: 6).
    pub daily_slots: u32,
    /// Line-up rerolls allowed per day (default: 2).
    pub reroll_daily_cap: u32,
    /// Reward cards needed for one egg, at least 1 (default: 1).
    pub egg_card_price: u32,
    /// Seconds from egg purchase until it can hatch (default: 6h).
    pub hatch_delay_secs: u64,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            daily_slots: 6,
            reroll_daily_cap: 2,
            egg_card_price: 1,
            hatch_delay_secs: 6 * 60 * 60,
        }
    }
}

impl ShopConfig {
    /// Incubation time of a freshly bought egg.
    pub fn hatch_delay(&self) -> TimeDelta {
        seconds(self.hatch_delay_secs)
    }
}
