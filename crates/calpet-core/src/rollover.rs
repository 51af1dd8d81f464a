//! Calendar day rollover.
//!
//! Day-scoped state is spread over several rule crates. [`roll_over_day`]
//! resets all of it in one place and must run before any other action on a
//! new day: the care rules' own daily reset advances `last_day_key`, after
//! which this function would see the new day as already handled.

use calpet_care::ensure_daily_reset;
use calpet_ledger::reset_today_cache;
use calpet_types::{Calendar, PetState};
use chrono::{DateTime, Utc};
use tracing::info;

/// Reset day-scoped fields when `now` falls on a new calendar day.
///
/// Runs the care daily reset (which also clears the instant-hatch flag),
/// zeroes the today cache, and moves the sync watermark to the start of the new day so
/// energy from previous days is never credited late. The shop restocks
/// itself from its own day key. Returns `true` if a rollover happened.
pub fn roll_over_day(state: &mut PetState, now: DateTime<Utc>, calendar: &Calendar) -> bool {
    let today = calendar.day_key(now);
    if state.last_day_key == today {
        return false;
    }
    let previous = state.last_day_key.clone();

    let _ = ensure_daily_reset(state, now, calendar);
    reset_today_cache(state);
    state.last_synced_at = Some(calendar.start_of_day(now));

    info!(from = %previous, to = %today, "Day rolled over");
    true
}
