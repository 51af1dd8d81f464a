//! Calendar-local day boundaries.
//!
//! Every timestamp in the engine is stored as `DateTime<Utc>`, but "today"
//! is a calendar-local notion: the day rolls over at local midnight of the
//! player's configured calendar. [`Calendar`] owns that mapping. It is a
//! fixed UTC offset rather than a full time zone database so that day keys
//! are deterministic in tests and identical on every host.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Timelike, Utc};

use crate::ids::DayKey;

/// Number of seconds in one minute, used to convert configured offsets.
const SECONDS_PER_MINUTE: i32 = 60;

/// Errors that can occur when constructing a [`Calendar`].
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// The configured UTC offset is outside the +/-24h range.
    #[error("invalid UTC offset: {minutes} minutes")]
    InvalidOffset {
        /// The rejected offset in minutes east of UTC.
        minutes: i32,
    },
}

/// A calendar that maps UTC timestamps to local dates and day keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    /// Offset of local time from UTC.
    offset: FixedOffset,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar {
    /// A calendar whose days roll over at UTC midnight.
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Create a calendar from an offset in minutes east of UTC
    /// (e.g. `540` for JST).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidOffset`] if the offset does not fit
    /// within a day.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, CalendarError> {
        let offset = minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .and_then(FixedOffset::east_opt)
            .ok_or(CalendarError::InvalidOffset { minutes })?;
        Ok(Self { offset })
    }

    /// Return the local UTC offset.
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Return the calendar-local date of a timestamp.
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    /// Return the calendar-local hour (0-23) of a timestamp.
    pub fn local_hour(&self, at: DateTime<Utc>) -> u32 {
        at.with_timezone(&self.offset).hour()
    }

    /// Format a timestamp as a calendar-local `YYYYMMDD` day key.
    pub fn day_key(&self, at: DateTime<Utc>) -> DayKey {
        DayKey::from_date(self.local_date(at))
    }

    /// Return the instant of local midnight that starts the day containing
    /// `at`.
    ///
    /// A fixed offset never produces ambiguous or skipped local times, so the
    /// fallback to `at` is only reachable at the edges of the representable
    /// date range.
    pub fn start_of_day(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        self.local_date(at)
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| self.offset.from_local_datetime(&midnight).single())
            .map_or(at, |local| local.with_timezone(&Utc))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn utc_day_key() {
        let cal = Calendar::utc();
        assert_eq!(cal.day_key(at("2026-02-03T23:59:59Z")), DayKey::from("20260203"));
        assert_eq!(cal.day_key(at("2026-02-04T00:00:00Z")), DayKey::from("20260204"));
    }

    #[test]
    fn offset_shifts_the_day_boundary() {
        // JST is UTC+9: 15:00Z is already midnight of the next local day.
        let cal = Calendar::from_offset_minutes(9 * 60).unwrap();
        assert_eq!(cal.day_key(at("2026-02-03T14:59:59Z")), DayKey::from("20260203"));
        assert_eq!(cal.day_key(at("2026-02-03T15:00:00Z")), DayKey::from("20260204"));
        assert_eq!(cal.local_hour(at("2026-02-03T15:30:00Z")), 0);
    }

    #[test]
    fn start_of_day_is_local_midnight() {
        let cal = Calendar::from_offset_minutes(9 * 60).unwrap();
        let start = cal.start_of_day(at("2026-02-04T03:00:00Z"));
        assert_eq!(start, at("2026-02-03T15:00:00Z"));
    }

    #[test]
    fn rejects_out_of_range_offset() {
        assert!(Calendar::from_offset_minutes(24 * 60).is_err());
        assert!(Calendar::from_offset_minutes(-24 * 60).is_err());
        assert!(Calendar::from_offset_minutes(-5 * 60).is_ok());
    }
}
