//! Satisfaction decay and feeding.
//!
//! Satisfaction is a small integer in `0..=max` that drops by one level per
//! elapsed decay unit. Decay is lazy: nothing ticks in the background. The
//! stored `(level, baseline)` pair is only advanced when an action calls
//! [`apply_decay`]; display code uses [`current_satisfaction`], which computes
//! the same value without touching the state.
//!
//! When decay is committed the baseline advances by exactly
//! `steps * decay_unit`, so the partial unit already elapsed keeps counting
//! toward the next drop.

use calpet_types::{Calendar, PetState};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::config::CareConfig;
use crate::daily::ensure_daily_reset;
use crate::error::CareError;

/// Satisfaction as of a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatisfactionReading {
    /// Level after decay, within `0..=max`.
    pub level: u32,
    /// Baseline advanced by the whole decay units consumed. `None` when the
    /// state has never been seeded.
    pub effective_baseline: Option<DateTime<Utc>>,
}

/// Result of a successful feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOutcome {
    /// Level after decay, before the meal.
    pub before: u32,
    /// Level after the meal.
    pub after: u32,
}

/// Compute satisfaction at `now` without mutating the state.
pub fn compute_satisfaction(
    state: &PetState,
    now: DateTime<Utc>,
    config: &CareConfig,
) -> SatisfactionReading {
    let stored = state.satisfaction_level.min(config.satisfaction_max);
    let Some(baseline) = state.satisfaction_last_updated_at else {
        return SatisfactionReading {
            level: stored,
            effective_baseline: None,
        };
    };
    let unchanged = SatisfactionReading {
        level: stored,
        effective_baseline: Some(baseline),
    };

    let unit_ms = config.decay_unit().num_milliseconds();
    let elapsed_ms = now.signed_duration_since(baseline).num_milliseconds();
    let steps = elapsed_ms.checked_div(unit_ms).unwrap_or(0);
    if unit_ms <= 0 || steps <= 0 {
        return unchanged;
    }

    let level = i64::from(stored)
        .saturating_sub(steps)
        .clamp(0, i64::from(config.satisfaction_max));
    let level = u32::try_from(level).unwrap_or(0);

    let advanced = steps
        .checked_mul(unit_ms)
        .and_then(TimeDelta::try_milliseconds)
        .and_then(|shift| baseline.checked_add_signed(shift))
        .unwrap_or(now);

    SatisfactionReading {
        level,
        effective_baseline: Some(advanced),
    }
}

/// Satisfaction level at `now`. Pure; safe to call on every frame.
pub fn current_satisfaction(state: &PetState, now: DateTime<Utc>, config: &CareConfig) -> u32 {
    compute_satisfaction(state, now, config).level
}

/// Whether the pet can be fed at `now`.
///
/// # Errors
///
/// Returns [`CareError::AlreadySatisfied`] when the decayed level is at the
/// maximum.
pub fn can_feed(state: &PetState, now: DateTime<Utc>, config: &CareConfig) -> Result<(), CareError> {
    let level = current_satisfaction(state, now, config);
    if level >= config.satisfaction_max {
        return Err(CareError::AlreadySatisfied {
            level,
            max: config.satisfaction_max,
        });
    }
    Ok(())
}

/// Commit elapsed decay to the state and return the resulting level.
///
/// Runs the daily boundary check first. The very first call on a state
/// without a baseline only seeds the baseline at `now`; decay starts from
/// there.
pub fn apply_decay(
    state: &mut PetState,
    now: DateTime<Utc>,
    calendar: &Calendar,
    config: &CareConfig,
) -> u32 {
    let _ = ensure_daily_reset(state, now, calendar);

    if state.satisfaction_last_updated_at.is_none() {
        state.satisfaction_last_updated_at = Some(now);
        state.satisfaction_level = state.satisfaction_level.min(config.satisfaction_max);
        return state.satisfaction_level;
    }

    let reading = compute_satisfaction(state, now, config);
    if reading.level != state.satisfaction_level {
        debug!(
            from = state.satisfaction_level,
            to = reading.level,
            "Satisfaction decayed"
        );
    }
    state.satisfaction_level = reading.level;
    if let Some(baseline) = reading.effective_baseline {
        state.satisfaction_last_updated_at = Some(baseline);
    }
    state.satisfaction_level
}

/// Feed the pet once: +1 satisfaction, capped, and restart the decay clock.
///
/// Decay is committed before the check, so a failed feed may still have
/// advanced the stored level and baseline to their decayed values. The level
/// a caller observes through [`current_satisfaction`] is unchanged by that.
///
/// # Errors
///
/// Returns [`CareError::AlreadySatisfied`] when the level is already at the
/// maximum after decay.
pub fn feed(
    state: &mut PetState,
    now: DateTime<Utc>,
    calendar: &Calendar,
    config: &CareConfig,
) -> Result<FeedOutcome, CareError> {
    let before = apply_decay(state, now, calendar, config);
    if before >= config.satisfaction_max {
        return Err(CareError::AlreadySatisfied {
            level: before,
            max: config.satisfaction_max,
        });
    }

    let after = before.saturating_add(1).min(config.satisfaction_max);
    state.satisfaction_level = after;
    state.satisfaction_last_updated_at = Some(now);
    debug!(before, after, "Pet fed");
    Ok(FeedOutcome { before, after })
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

    fn seeded(level: u32, baseline: DateTime<Utc>) -> PetState {
        let mut state = PetState::new(baseline, &Calendar::utc());
        state.satisfaction_level = level;
        state.satisfaction_last_updated_at = Some(baseline);
        state
    }

    #[test]
    fn unseeded_state_reports_stored_level() {
        let cfg = CareConfig::default();
        let now = at("2026-02-03T09:00:00Z");
        let state = PetState::new(now, &Calendar::utc());
        let reading = compute_satisfaction(&state, at("2026-02-03T20:00:00Z"), &cfg);
        assert_eq!(reading.level, 3);
        assert!(reading.effective_baseline.is_none());
    }

    #[test]
    fn exact_units_reduce_by_that_many_levels() {
        let cfg = CareConfig::default();
        let base = at("2026-02-03T08:00:00Z");
        let state = seeded(3, base);
        assert_eq!(current_satisfaction(&state, at("2026-02-03T10:00:00Z"), &cfg), 2);
        assert_eq!(current_satisfaction(&state, at("2026-02-03T12:00:00Z"), &cfg), 1);
        assert_eq!(current_satisfaction(&state, at("2026-02-03T14:00:00Z"), &cfg), 0);
        // Floors at zero.
        assert_eq!(current_satisfaction(&state, at("2026-02-04T14:00:00Z"), &cfg), 0);
    }

    #[test]
    fn partial_unit_does_not_decay() {
        let cfg = CareConfig::default();
        let base = at("2026-02-03T08:00:00Z");
        let state = seeded(3, base);
        let reading = compute_satisfaction(&state, at("2026-02-03T09:59:59Z"), &cfg);
        assert_eq!(reading.level, 3);
        assert_eq!(reading.effective_baseline, Some(base));
    }

    #[test]
    fn decay_is_monotonic() {
        let cfg = CareConfig::default();
        let base = at("2026-02-03T08:00:00Z");
        let state = seeded(3, base);
        let mut last = u32::MAX;
        for minutes in (0..600).step_by(17) {
            let now = base
                .checked_add_signed(TimeDelta::minutes(minutes))
                .unwrap_or(base);
            let level = current_satisfaction(&state, now, &cfg);
            assert!(level <= last);
            last = level;
        }
    }

    #[test]
    fn baseline_advances_by_whole_units_only() {
        let cfg = CareConfig::default();
        let base = at("2026-02-03T08:00:00Z");
        let mut state = seeded(3, base);
        let now = at("2026-02-03T11:30:00Z");
        assert_eq!(apply_decay(&mut state, now, &Calendar::utc(), &cfg), 2);
        assert_eq!(state.satisfaction_last_updated_at, Some(at("2026-02-03T10:00:00Z")));
        // The remaining 1h30 still counts: half an hour later another level goes.
        assert_eq!(current_satisfaction(&state, at("2026-02-03T12:00:00Z"), &cfg), 1);
    }

    #[test]
    fn first_apply_only_seeds_the_baseline() {
        let cfg = CareConfig::default();
        let now = at("2026-02-03T09:00:00Z");
        let mut state = PetState::new(now, &Calendar::utc());
        assert_eq!(apply_decay(&mut state, now, &Calendar::utc(), &cfg), 3);
        assert_eq!(state.satisfaction_last_updated_at, Some(now));
    }

    #[test]
    fn can_feed_only_below_max() {
        let cfg = CareConfig::default();
        let base = at("2026-02-03T08:00:00Z");
        let state = seeded(3, base);
        assert!(can_feed(&state, base, &cfg).is_err());
        assert!(can_feed(&state, at("2026-02-03T10:00:00Z"), &cfg).is_ok());
    }

    #[test]
    fn feed_increments_and_resets_the_clock() {
        let cfg = CareConfig::default();
        let cal = Calendar::utc();
        let base = at("2026-02-03T08:00:00Z");
        let mut state = seeded(3, base);
        let now = at("2026-02-03T12:30:00Z");
        let outcome = feed(&mut state, now, &cal, &cfg);
        assert_eq!(outcome, Ok(FeedOutcome { before: 1, after: 2 }));
        assert_eq!(state.satisfaction_last_updated_at, Some(now));
        // A full unit must elapse from the feed before the next drop.
        assert_eq!(current_satisfaction(&state, at("2026-02-03T14:29:00Z"), &cfg), 2);
        assert_eq!(current_satisfaction(&state, at("2026-02-03T14:30:00Z"), &cfg), 1);
    }

    #[test]
    fn feed_at_max_is_refused() {
        let cfg = CareConfig::default();
        let cal = Calendar::utc();
        let base = at("2026-02-03T08:00:00Z");
        let mut state = seeded(3, base);
        let result = feed(&mut state, at("2026-02-03T09:00:00Z"), &cal, &cfg);
        assert_eq!(result, Err(CareError::AlreadySatisfied { level: 3, max: 3 }));
        assert_eq!(state.satisfaction_level, 3);
        assert_eq!(state.satisfaction_last_updated_at, Some(base));
    }

    #[test]
    fn stored_level_above_max_is_clamped() {
        let cfg = CareConfig::default();
        let base = at("2026-02-03T08:00:00Z");
        let state = seeded(9, base);
        assert_eq!(current_satisfaction(&state, base, &cfg), 3);
    }
}
