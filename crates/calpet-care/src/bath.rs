//! Bath cooldown and the daily accelerant.
//!
//! A bath starts an 8h cooldown (configurable). While the cooldown runs, the
//! player may use an accelerant (at most twice per day) which pretends the
//! last bath happened 4h earlier.

use calpet_types::{Calendar, PetState};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::config::CareConfig;
use crate::daily::{ensure_daily_reset, is_current_day};
use crate::error::CareError;

/// Seconds per minute, for rounding the remaining cooldown.
const SECONDS_PER_MINUTE: i64 = 60;

/// Bath availability at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BathStatus {
    /// A bath can be taken now.
    Available,
    /// The cooldown is still running.
    Cooling {
        /// Time left until the bath is available.
        remaining: TimeDelta,
    },
}

impl BathStatus {
    /// Whether a bath can be taken now.
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Convert into a `Result`, refusing while cooling.
    ///
    /// # Errors
    ///
    /// Returns [`CareError::BathCoolingDown`] with the remaining time rounded
    /// up to whole minutes.
    pub fn ensure_available(self) -> Result<(), CareError> {
        match self {
            Self::Available => Ok(()),
            Self::Cooling { remaining } => {
                let secs = remaining.num_seconds();
                let remaining_minutes = secs
                    .saturating_add(SECONDS_PER_MINUTE.saturating_sub(1))
                    .checked_div(SECONDS_PER_MINUTE)
                    .unwrap_or(0);
                Err(CareError::BathCoolingDown { remaining_minutes })
            }
        }
    }
}

/// Bath availability at `now`. Pure.
pub fn can_bath(state: &PetState, now: DateTime<Utc>, config: &CareConfig) -> BathStatus {
    let Some(last) = state.bath_last_at else {
        return BathStatus::Available;
    };
    let elapsed = now.signed_duration_since(last);
    let remaining = config
        .bath_cooldown()
        .checked_sub(&elapsed)
        .unwrap_or(TimeDelta::zero());
    if remaining <= TimeDelta::zero() {
        BathStatus::Available
    } else {
        BathStatus::Cooling { remaining }
    }
}

/// Whether an accelerant can be used at `now`. Pure.
///
/// Accelerant uses recorded on a previous day count as zero.
///
/// # Errors
///
/// - [`CareError::AccelerantCapReached`] when today's uses are exhausted.
/// - [`CareError::BathNotCooling`] when no cooldown is running.
pub fn can_use_accelerant(
    state: &PetState,
    now: DateTime<Utc>,
    calendar: &Calendar,
    config: &CareConfig,
) -> Result<(), CareError> {
    let used = if is_current_day(state, now, calendar) {
        state.bath_accelerated_uses_today
    } else {
        0
    };
    if used >= config.accelerant_daily_cap {
        return Err(CareError::AccelerantCapReached {
            used,
            cap: config.accelerant_daily_cap,
        });
    }
    if can_bath(state, now, config).is_available() {
        return Err(CareError::BathNotCooling);
    }
    Ok(())
}

/// Record a bath at `now`, starting a new cooldown.
///
/// The caller checks [`can_bath`] first and grants the bath reward.
pub fn mark_bath_done(state: &mut PetState, now: DateTime<Utc>, calendar: &Calendar) {
    let _ = ensure_daily_reset(state, now, calendar);
    state.bath_last_at = Some(now);
    debug!(%now, "Bath taken");
}

/// Use one accelerant: shift the last bath back by the configured amount.
///
/// Returns the bath status afterwards.
///
/// # Errors
///
/// Same as [`can_use_accelerant`], evaluated after the daily reset.
pub fn apply_accelerant(
    state: &mut PetState,
    now: DateTime<Utc>,
    calendar: &Calendar,
    config: &CareConfig,
) -> Result<BathStatus, CareError> {
    let _ = ensure_daily_reset(state, now, calendar);
    can_use_accelerant(state, now, calendar, config)?;

    let Some(last) = state.bath_last_at else {
        return Err(CareError::BathNotCooling);
    };
    let uses = state
        .bath_accelerated_uses_today
        .checked_add(1)
        .ok_or_else(|| CareError::ArithmeticOverflow {
            context: String::from("accelerant use counter"),
        })?;
    let shifted = last
        .checked_sub_signed(config.accelerant_shift())
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    state.bath_accelerated_uses_today = uses;
    state.bath_last_at = Some(shifted);
    let status = can_bath(state, now, config);
    debug!(uses, available = status.is_available(), "Bath accelerant used");
    Ok(status)
}
