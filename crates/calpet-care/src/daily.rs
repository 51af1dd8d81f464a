//! Day boundary handling.
//!
//! Day-scoped fields (accelerant uses, toilet request, instant hatch) are
//! reset lazily: the first action of a new calendar day calls
//! [`ensure_daily_reset`]. Judgment functions never call it; they use
//! [`is_current_day`] to treat stale counters as already reset.

use calpet_types::{Calendar, PetState};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Whether the state's day-scoped fields belong to the day containing `now`.
pub fn is_current_day(state: &PetState, now: DateTime<Utc>, calendar: &Calendar) -> bool {
    state.last_day_key == calendar.day_key(now)
}

/// Reset day-scoped fields if `now` falls on a new calendar day.
///
/// Returns `true` when a reset happened. Calling it again on the same day is
/// a no-op. Satisfaction keeps its level across days; only a missing decay
/// baseline is seeded.
pub fn ensure_daily_reset(state: &mut PetState, now: DateTime<Utc>, calendar: &Calendar) -> bool {
    let today = calendar.day_key(now);
    if state.last_day_key == today {
        return false;
    }

    state.bath_accelerated_uses_today = 0;
    state.toilet_flag_at = None;
    state.toilet_last_raised_at = None;
    state.egg_instant_hatch_used_today = false;
    if state.satisfaction_last_updated_at.is_none() {
        state.satisfaction_last_updated_at = Some(now);
    }

    debug!(from = %state.last_day_key, to = %today, "Daily reset");
    state.last_day_key = today;
    true
}
