//! Slot-based feeding policy.
//!
//! An alternative to satisfaction-driven feeding: the day has three meal
//! windows and each may be served once. This policy keeps its own
//! [`SlotFeedLog`] and is not wired into [`PetState`](calpet_types::PetState);
//! a host that prefers meal times over satisfaction decay persists the log
//! next to the state.
//!
//! Windows are inclusive local hours: morning 6-10, noon 12-16,
//! night 18-23.

use calpet_types::{Calendar, DayKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CareError;

/// Meals allowed per day.
pub const DAILY_FEED_LIMIT: u32 = 3;

/// One of the three daily meal windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSlot {
    /// Local hours 6 through 10.
    Morning,
    /// Local hours 12 through 16.
    Noon,
    /// Local hours 18 through 23.
    Night,
}

impl FeedSlot {
    /// The slot whose window contains the local `hour`, if any.
    pub const fn for_hour(hour: u32) -> Option<Self> {
        match hour {
            6..=10 => Some(Self::Morning),
            12..=16 => Some(Self::Noon),
            18..=23 => Some(Self::Night),
            _ => None,
        }
    }

    /// Lowercase name used in messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Noon => "noon",
            Self::Night => "night",
        }
    }
}

/// Which slots were served on `day_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFeedLog {
    /// Day the flags belong to.
    pub day_key: DayKey,
    /// Morning meal served.
    pub morning: bool,
    /// Noon meal served.
    pub noon: bool,
    /// Night meal served.
    pub night: bool,
}

impl SlotFeedLog {
    /// An empty log for `day_key`.
    pub const fn new(day_key: DayKey) -> Self {
        Self {
            day_key,
            morning: false,
            noon: false,
            night: false,
        }
    }

    /// Whether `slot` was served.
    pub const fn is_fed(&self, slot: FeedSlot) -> bool {
        match slot {
            FeedSlot::Morning => self.morning,
            FeedSlot::Noon => self.noon,
            FeedSlot::Night => self.night,
        }
    }

    /// Meals served on the logged day.
    pub fn fed_count(&self) -> u32 {
        [self.morning, self.noon, self.night]
            .into_iter()
            .map(u32::from)
            .sum()
    }

    /// The slot that may be served at `now`. Pure; a log from a previous day
    /// counts as empty.
    ///
    /// # Errors
    ///
    /// - [`CareError::DailyFeedLimit`] once every meal of the day is served.
    /// - [`CareError::OutsideFeedingWindow`] between windows.
    /// - [`CareError::SlotAlreadyFed`] when the current slot was served.
    pub fn can_feed(&self, now: DateTime<Utc>, calendar: &Calendar) -> Result<FeedSlot, CareError> {
        let hour = calendar.local_hour(now);
        let slot = FeedSlot::for_hour(hour).ok_or(CareError::OutsideFeedingWindow { hour })?;
        if self.day_key != calendar.day_key(now) {
            return Ok(slot);
        }
        if self.fed_count() >= DAILY_FEED_LIMIT {
            return Err(CareError::DailyFeedLimit {
                limit: DAILY_FEED_LIMIT,
            });
        }
        if self.is_fed(slot) {
            return Err(CareError::SlotAlreadyFed { slot: slot.name() });
        }
        Ok(slot)
    }

    /// Serve the current slot, starting a fresh log on a new day.
    ///
    /// # Errors
    ///
    /// Same as [`SlotFeedLog::can_feed`].
    pub fn mark_fed(&mut self, now: DateTime<Utc>, calendar: &Calendar) -> Result<FeedSlot, CareError> {
        let slot = self.can_feed(now, calendar)?;
        let today = calendar.day_key(now);
        if self.day_key != today {
            *self = Self::new(today);
        }
        match slot {
            FeedSlot::Morning => self.morning = true,
            FeedSlot::Noon => self.noon = true,
            FeedSlot::Night => self.night = true,
        }
        debug!(slot = slot.name(), "Meal served");
        Ok(slot)
    }
}
