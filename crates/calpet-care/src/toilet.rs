//! Toilet requests.
//!
//! A request is raised at random by the care loop (the roll lives in the
//! pet store so that randomness stays injectable). Resolving a request within
//! the bonus window earns the quick reward; later resolutions earn the
//! regular one.

use calpet_types::{Calendar, PetState};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::CareConfig;
use crate::daily::{ensure_daily_reset, is_current_day};
use crate::error::CareError;

/// Result of [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToiletResolution {
    /// Whether an open request was resolved.
    pub resolved: bool,
    /// Whether it was resolved inside the bonus window.
    pub within_bonus_window: bool,
}

/// Whether a new request may be raised at `now`. Pure.
///
/// A request or raise time left over from a previous day is ignored, since
/// the next action will clear it.
///
/// # Errors
///
/// - [`CareError::ToiletAlreadyRequested`] while a request is open.
/// - [`CareError::ToiletTooSoon`] within the minimum interval of the last
///   raise.
pub fn can_raise_flag(
    state: &PetState,
    now: DateTime<Utc>,
    calendar: &Calendar,
    config: &CareConfig,
) -> Result<(), CareError> {
    if !is_current_day(state, now, calendar) {
        return Ok(());
    }
    if state.toilet_flag_at.is_some() {
        return Err(CareError::ToiletAlreadyRequested);
    }
    if let Some(last) = state.toilet_last_raised_at
        && now.signed_duration_since(last) < config.toilet_min_interval()
    {
        return Err(CareError::ToiletTooSoon);
    }
    Ok(())
}

/// Open a toilet request at `now`.
///
/// # Errors
///
/// Same as [`can_raise_flag`], evaluated after the daily reset.
pub fn raise_flag(
    state: &mut PetState,
    now: DateTime<Utc>,
    calendar: &Calendar,
    config: &CareConfig,
) -> Result<(), CareError> {
    let _ = ensure_daily_reset(state, now, calendar);
    can_raise_flag(state, now, calendar, config)?;
    state.toilet_flag_at = Some(now);
    state.toilet_last_raised_at = Some(now);
    debug!(%now, "Toilet request raised");
    Ok(())
}

/// Resolve the open request, if any.
///
/// The bonus window is inclusive: resolving exactly at its end still counts.
pub fn resolve(
    state: &mut PetState,
    now: DateTime<Utc>,
    calendar: &Calendar,
    config: &CareConfig,
) -> ToiletResolution {
    let _ = ensure_daily_reset(state, now, calendar);
    let Some(flag_at) = state.toilet_flag_at.take() else {
        return ToiletResolution {
            resolved: false,
            within_bonus_window: false,
        };
    };
    let within_bonus_window = now.signed_duration_since(flag_at) <= config.toilet_bonus_window();
    debug!(within_bonus_window, "Toilet request resolved");
    ToiletResolution {
        resolved: true,
        within_bonus_window,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn flagged(flag_at: DateTime<Utc>) -> PetState {
        let mut state = PetState::new(flag_at, &Calendar::utc());
        state.toilet_flag_at = Some(flag_at);
        state.toilet_last_raised_at = Some(flag_at);
        state
    }

    #[test]
    fn resolve_within_59_minutes_earns_bonus() {
        let cfg = CareConfig::default();
        let t0 = at("2026-02-03T09:00:00Z");
        let mut state = flagged(t0);
        let now = t0.checked_add_signed(TimeDelta::minutes(59)).unwrap_or(t0);
        let r = resolve(&mut state, now, &Calendar::utc(), &cfg);
        assert!(r.resolved);
        assert!(r.within_bonus_window);
        assert!(state.toilet_flag_at.is_none());
    }

    #[test]
    fn resolve_after_61_minutes_misses_bonus() {
        let cfg = CareConfig::default();
        let t0 = at("2026-02-03T09:00:00Z");
        let mut state = flagged(t0);
        let now = t0.checked_add_signed(TimeDelta::minutes(61)).unwrap_or(t0);
        let r = resolve(&mut state, now, &Calendar::utc(), &cfg);
        assert!(r.resolved);
        assert!(!r.within_bonus_window);
    }

    #[test]
    fn bonus_window_is_inclusive() {
        let cfg = CareConfig::default();
        let t0 = at("2026-02-03T09:00:00Z");
        let mut state = flagged(t0);
        let r = resolve(&mut state, at("2026-02-03T10:00:00Z"), &Calendar::utc(), &cfg);
        assert!(r.within_bonus_window);
    }

    #[test]
    fn resolve_without_request_does_nothing() {
        let cfg = CareConfig::default();
        let now = at("2026-02-03T09:00:00Z");
        let mut state = PetState::new(now, &Calendar::utc());
        let r = resolve(&mut state, now, &Calendar::utc(), &cfg);
        assert!(!r.resolved);
        assert!(!r.within_bonus_window);
    }

    #[test]
    fn raise_respects_open_request_and_interval() {
        let cfg = CareConfig::default();
        let cal = Calendar::utc();
        let t0 = at("2026-02-03T09:00:00Z");
        let mut state = PetState::new(t0, &cal);
        assert!(raise_flag(&mut state, t0, &cal, &cfg).is_ok());
        assert_eq!(
            raise_flag(&mut state, t0, &cal, &cfg),
            Err(CareError::ToiletAlreadyRequested)
        );
        let _ = resolve(&mut state, at("2026-02-03T09:10:00Z"), &cal, &cfg);
        assert_eq!(
            can_raise_flag(&state, at("2026-02-03T09:59:00Z"), &cal, &cfg),
            Err(CareError::ToiletTooSoon)
        );
        assert!(can_raise_flag(&state, at("2026-02-03T10:00:00Z"), &cal, &cfg).is_ok());
    }

    #[test]
    fn request_does_not_carry_over_midnight() {
        let cfg = CareConfig::default();
        let cal = Calendar::utc();
        let mut state = flagged(at("2026-02-03T23:30:00Z"));
        let next = at("2026-02-04T00:10:00Z");
        assert!(can_raise_flag(&state, next, &cal, &cfg).is_ok());
        let r = resolve(&mut state, next, &cal, &cfg);
        assert!(!r.resolved);
    }
}
