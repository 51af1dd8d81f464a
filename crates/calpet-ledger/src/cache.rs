//! Zero-protected cache of today's step and energy totals.
//!
//! Health queries occasionally return 0 for a day that clearly has activity
//! (data still syncing, permission prompt in flight). The home screen must
//! not flicker back to zero when that happens, so a fresh zero never
//! overwrites a positive cached value for the same day.

use calpet_types::{DayKey, PetState};
use tracing::debug;

/// Values to display for today after a cache update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodayReading {
    /// Steps to display.
    pub steps: u64,
    /// Energy (active + basal) to display.
    pub energy: u64,
    /// Whether `steps` came from the cache rather than the fresh reading.
    pub steps_cached: bool,
    /// Whether `energy` came from the cache rather than the fresh reading.
    pub energy_cached: bool,
}

/// Zero the cached totals, as happens at every day boundary.
pub const fn reset_today_cache(state: &mut PetState) {
    state.cached_today_steps = 0;
    state.cached_today_energy = 0;
}

/// Merge fresh readings for `today` into the cache and return what to show.
///
/// If the state's day key is not `today` the cache belongs to a previous day
/// and is zeroed first, so yesterday's totals never leak into today.
pub fn update_today_cache(
    state: &mut PetState,
    fresh_steps: u64,
    fresh_energy: u64,
    today: &DayKey,
) -> TodayReading {
    if state.last_day_key != *today {
        debug!(%today, stale = %state.last_day_key, "Today cache belongs to a previous day");
        reset_today_cache(state);
    }
    let (steps, steps_cached) = protect_zero(&mut state.cached_today_steps, fresh_steps);
    let (energy, energy_cached) = protect_zero(&mut state.cached_today_energy, fresh_energy);
    TodayReading {
        steps,
        energy,
        steps_cached,
        energy_cached,
    }
}

/// Replace `cached` with `fresh` unless `fresh` is a zero that would erase a
/// positive value.
fn protect_zero(cached: &mut u64, fresh: u64) -> (u64, bool) {
    if fresh == 0 && *cached > 0 {
        (*cached, true)
    } else {
        *cached = fresh;
        (fresh, false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use calpet_types::Calendar;
    use chrono::{DateTime, Utc};

    use super::*;

    fn state_on(day: &str) -> PetState {
        let now = DateTime::parse_from_rfc3339(day)
            .unwrap()
            .with_timezone(&Utc);
        PetState::new(now, &Calendar::utc())
    }

    #[test]
    fn fresh_positive_values_replace_the_cache() {
        let mut state = state_on("2026-02-03T10:00:00Z");
        let today = DayKey::from("20260203");
        let first = update_today_cache(&mut state, 1200, 90, &today);
        assert_eq!(first.steps, 1200);
        let second = update_today_cache(&mut state, 3400, 210, &today);
        assert_eq!(second.steps, 3400);
        assert_eq!(second.energy, 210);
        assert!(!second.steps_cached);
        assert_eq!(state.cached_today_steps, 3400);
    }

    #[test]
    fn zero_does_not_erase_a_positive_value() {
        let mut state = state_on("2026-02-03T10:00:00Z");
        let today = DayKey::from("20260203");
        let _ = update_today_cache(&mut state, 3400, 210, &today);
        let reading = update_today_cache(&mut state, 0, 0, &today);
        assert_eq!(reading.steps, 3400);
        assert_eq!(reading.energy, 210);
        assert!(reading.steps_cached);
        assert!(reading.energy_cached);
    }

    #[test]
    fn zero_is_shown_when_nothing_was_cached() {
        let mut state = state_on("2026-02-03T10:00:00Z");
        let today = DayKey::from("20260203");
        let reading = update_today_cache(&mut state, 0, 0, &today);
        assert_eq!(reading.steps, 0);
        assert!(!reading.steps_cached);
    }

    #[test]
    fn stale_day_cache_is_zeroed_before_comparing() {
        let mut state = state_on("2026-02-03T10:00:00Z");
        state.cached_today_steps = 8000;
        state.cached_today_energy = 400;
        let tomorrow = DayKey::from("20260204");
        let reading = update_today_cache(&mut state, 0, 0, &tomorrow);
        assert_eq!(reading.steps, 0);
        assert_eq!(reading.energy, 0);
        assert_eq!(state.cached_today_steps, 0);
    }
}
