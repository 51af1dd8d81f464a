//! The scripted day replayed by the harness.
//!
//! A day is a fixed plan of actions at local clock times plus a set of
//! hourly health samples drawn from a seeded generator, so the same seed
//! always replays the same day.

use std::fmt;

use calpet_core::HealthSample;
use calpet_types::{Calendar, PetState};
use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;

/// First local hour with recorded activity.
const FIRST_ACTIVE_HOUR: u32 = 7;

/// Last local hour with recorded activity (inclusive).
const LAST_ACTIVE_HOUR: u32 = 21;

/// Basal energy burned per sampled hour, in kcal.
const BASAL_PER_HOUR: u64 = 50;

/// One host action the harness can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimAction {
    /// Pull new energy from the health source.
    Sync,
    /// Open the shop screen (draws today's line-up if needed).
    OpenShop,
    /// Buy the cheapest in-stock item.
    BuyCheapest,
    /// Feed the first owned food.
    Feed,
    /// Give the pet a bath.
    Bath,
    /// Shorten the running bath cooldown.
    AccelerateBath,
    /// Tap the toilet button.
    TapToilet,
    /// Put the pet to sleep.
    Sleep,
    /// Trade reward cards for an egg.
    BuyEgg,
    /// Skip the egg's incubation.
    InstantHatch,
    /// Hatch a ready egg.
    HatchEgg,
}

impl SimAction {
    /// Short name used in log fields.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::OpenShop => "open_shop",
            Self::BuyCheapest => "buy_cheapest",
            Self::Feed => "feed",
            Self::Bath => "bath",
            Self::AccelerateBath => "accelerate_bath",
            Self::TapToilet => "tap_toilet",
            Self::Sleep => "sleep",
            Self::BuyEgg => "buy_egg",
            Self::InstantHatch => "instant_hatch",
            Self::HatchEgg => "hatch_egg",
        }
    }
}

impl fmt::Display for SimAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A planned action at minutes past local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStep {
    /// Minutes after the start of the local day.
    pub minute: u32,
    /// What to do.
    pub action: SimAction,
}

impl ScriptStep {
    /// Absolute time of this step on the day starting at `day_start`.
    pub fn at(&self, day_start: DateTime<Utc>) -> DateTime<Utc> {
        day_start
            .checked_add_signed(TimeDelta::minutes(i64::from(self.minute)))
            .unwrap_or(day_start)
    }
}

const fn step(hour: u32, minute: u32, action: SimAction) -> ScriptStep {
    ScriptStep {
        minute: hour.saturating_mul(60).saturating_add(minute),
        action,
    }
}

/// The day plan, in chronological order.
pub const DAY_PLAN: &[ScriptStep] = &[
    step(7, 0, SimAction::Sync),
    step(7, 5, SimAction::OpenShop),
    step(7, 10, SimAction::Feed),
    step(8, 0, SimAction::TapToilet),
    step(9, 0, SimAction::Sync),
    step(9, 5, SimAction::BuyCheapest),
    step(9, 10, SimAction::Feed),
    step(10, 0, SimAction::Bath),
    step(10, 30, SimAction::AccelerateBath),
    step(11, 0, SimAction::TapToilet),
    step(12, 30, SimAction::Sync),
    step(12, 35, SimAction::BuyCheapest),
    step(12, 40, SimAction::Feed),
    step(13, 0, SimAction::Sleep),
    step(15, 0, SimAction::TapToilet),
    step(16, 0, SimAction::TapToilet),
    step(18, 30, SimAction::Sync),
    step(18, 35, SimAction::BuyCheapest),
    step(18, 40, SimAction::Feed),
    step(19, 0, SimAction::BuyEgg),
    step(19, 5, SimAction::InstantHatch),
    step(19, 10, SimAction::HatchEgg),
    step(21, 0, SimAction::Sync),
    step(21, 5, SimAction::Bath),
    step(22, 0, SimAction::Sleep),
];

/// Start of the local day the plan replays on.
///
/// Today, unless the state already records activity after today's start.
/// Then it is the day after the latest recorded activity, so a re-run never
/// lands behind the stored baselines and successive runs play successive
/// days.
pub fn replay_day_start(state: &PetState, now: DateTime<Utc>, calendar: &Calendar) -> DateTime<Utc> {
    let today = calendar.start_of_day(now);
    let latest = [
        state.last_synced_at,
        state.satisfaction_last_updated_at,
        state.bath_last_at,
        state.toilet_flag_at,
        state.toilet_last_raised_at,
    ]
    .into_iter()
    .flatten()
    .max();
    let Some(latest) = latest.filter(|at| *at > today) else {
        return today;
    };
    let played = calendar.start_of_day(latest);
    if latest > played {
        played.checked_add_signed(TimeDelta::days(1)).unwrap_or(played)
    } else {
        played
    }
}

/// Hourly health samples for the day starting at `day_start`.
///
/// One sample per hour from 07:00 to 21:00 local, each covering the hour
/// that ends at its timestamp.
pub fn day_samples(day_start: DateTime<Utc>, rng: &mut impl Rng) -> Vec<HealthSample> {
    (FIRST_ACTIVE_HOUR..=LAST_ACTIVE_HOUR)
        .map(|hour| HealthSample {
            at: day_start
                .checked_add_signed(TimeDelta::hours(i64::from(hour)))
                .unwrap_or(day_start),
            active_energy: rng.random_range(20..=60),
            basal_energy: BASAL_PER_HOUR,
            steps: rng.random_range(500..=1500),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn day_start() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-02T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn at_hour(hour: i64) -> DateTime<Utc> {
        day_start().checked_add_signed(TimeDelta::hours(hour)).unwrap()
    }

    #[test]
    fn plan_is_chronological_and_within_the_day() {
        for pair in DAY_PLAN.windows(2) {
            if let [a, b] = pair {
                assert!(a.minute < b.minute, "{} before {}", a.action, b.action);
            }
        }
        assert!(DAY_PLAN.iter().all(|s| s.minute < 24 * 60));
    }

    #[test]
    fn step_times_are_offsets_from_day_start() {
        let s = step(9, 5, SimAction::BuyCheapest);
        assert_eq!(
            s.at(day_start()).signed_duration_since(day_start()),
            TimeDelta::minutes(545)
        );
    }

    #[test]
    fn fresh_state_replays_today() {
        let cal = Calendar::utc();
        let now = at_hour(15);
        let state = PetState::new(now, &cal);
        assert_eq!(replay_day_start(&state, now, &cal), day_start());
    }

    #[test]
    fn played_day_moves_the_replay_to_the_next_day() {
        let cal = Calendar::utc();
        let now = at_hour(15);
        let mut state = PetState::new(now, &cal);
        state.last_synced_at = Some(at_hour(21));
        state.bath_last_at = Some(at_hour(10));
        let next = day_start().checked_add_signed(TimeDelta::days(1)).unwrap();
        assert_eq!(replay_day_start(&state, now, &cal), next);
    }

    #[test]
    fn rolled_over_watermark_alone_keeps_that_day() {
        let cal = Calendar::utc();
        let now = at_hour(15);
        let mut state = PetState::new(now, &cal);
        // A rollover parks the watermark at local midnight.
        state.last_synced_at = Some(day_start());
        state.satisfaction_last_updated_at = Some(at_hour(-3));
        assert_eq!(replay_day_start(&state, now, &cal), day_start());
    }

    #[test]
    fn samples_are_hourly_and_reproducible() {
        let a = day_samples(day_start(), &mut SmallRng::seed_from_u64(7));
        let b = day_samples(day_start(), &mut SmallRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.len(), 15);
        assert!(a.iter().all(|s| s.basal_energy == BASAL_PER_HOUR));
        assert!(a.iter().all(|s| (20..=60).contains(&s.active_energy)));
    }
}
