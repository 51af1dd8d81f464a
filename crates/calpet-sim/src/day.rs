//! Replays a [`DAY_PLAN`](crate::script::DAY_PLAN) against a [`PetStore`].

use calpet_core::{CoreError, HealthSource, PetStore, ToiletTap};
use calpet_shop::HatchOutcome;
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info};

use crate::script::{ScriptStep, SimAction};

/// Counts from one replayed day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySummary {
    /// Actions that changed the state.
    pub performed: u32,
    /// Actions the rules refused or that had nothing to do.
    pub refused: u32,
}

/// Run every step of `plan` on the day starting at `day_start`.
///
/// Refused actions are logged and counted, never fatal.
pub fn run_day(
    store: &mut PetStore,
    plan: &[ScriptStep],
    day_start: DateTime<Utc>,
    source: &impl HealthSource,
    rng: &mut impl Rng,
) -> DaySummary {
    let mut summary = DaySummary::default();
    for step in plan {
        let now = step.at(day_start);
        match perform(store, step.action, now, source, rng) {
            Ok(true) => summary.performed = summary.performed.saturating_add(1),
            Ok(false) => summary.refused = summary.refused.saturating_add(1),
            Err(err) => {
                info!(action = %step.action, %now, reason = %err, "Action refused");
                summary.refused = summary.refused.saturating_add(1);
            }
        }
    }
    summary
}

/// Perform one action. `Ok(false)` means there was nothing to do.
fn perform(
    store: &mut PetStore,
    action: SimAction,
    now: DateTime<Utc>,
    source: &impl HealthSource,
    rng: &mut impl Rng,
) -> Result<bool, CoreError> {
    match action {
        SimAction::Sync => {
            let outcome = store.sync_health(now, source)?;
            info!(
                deposited = outcome.deposited,
                pending = outcome.pending,
                steps_today = outcome.today.steps,
                energy_today = outcome.today.energy,
                goal_progress = store.goal_progress(),
                "Synced"
            );
            Ok(true)
        }
        SimAction::OpenShop => {
            let drawn = store.open_shop(now, rng);
            let listed = store.state().shop_items.as_ref().map_or(0, Vec::len);
            info!(drawn, listed, "Shop opened");
            Ok(true)
        }
        SimAction::BuyCheapest => {
            let budget = store
                .state()
                .wallet_energy
                .saturating_add(store.state().pending_energy);
            let cheapest = store.state().shop_items.as_ref().and_then(|items| {
                items
                    .iter()
                    .filter(|item| item.stock > 0 && item.price <= budget)
                    .min_by_key(|item| item.price)
                    .map(|item| item.id.clone())
            });
            let Some(item) = cheapest else {
                info!(budget, "Nothing affordable in the shop");
                return Ok(false);
            };
            let purchase = store.buy_food(now, &item, rng)?;
            info!(
                item = %purchase.item,
                price = purchase.price,
                wallet_after = purchase.wallet_after,
                owned_after = purchase.owned_after,
                "Bought food"
            );
            Ok(true)
        }
        SimAction::Feed => {
            let Some(food) = store.first_owned_food() else {
                info!("No food to serve");
                return Ok(false);
            };
            let fed = store.feed_with_food(now, &food)?;
            info!(
                food = %fed.food,
                food_left = fed.food_left,
                satisfaction = fed.feed.after,
                affinity = fed.affinity.after,
                cards_gained = fed.affinity.cards_gained,
                "Fed the pet"
            );
            Ok(true)
        }
        SimAction::Bath => {
            let gain = store.bath(now)?;
            info!(affinity = gain.after, cards_gained = gain.cards_gained, "Bathed the pet");
            Ok(true)
        }
        SimAction::AccelerateBath => {
            let status = store.accelerate_bath(now)?;
            info!(available = status.is_available(), "Bath cooldown shortened");
            Ok(true)
        }
        SimAction::TapToilet => match store.tap_toilet(now, rng)? {
            ToiletTap::Resolved {
                within_bonus_window,
                affinity,
            } => {
                info!(within_bonus_window, affinity = affinity.after, "Toilet cleaned");
                Ok(true)
            }
            ToiletTap::Raised => {
                info!("Pet needs the toilet");
                Ok(true)
            }
            ToiletTap::Nothing => {
                debug!("Toilet tap did nothing");
                Ok(false)
            }
        },
        SimAction::Sleep => {
            let gain = store.sleep(now)?;
            info!(affinity = gain.after, cards_gained = gain.cards_gained, "Pet slept");
            Ok(true)
        }
        SimAction::BuyEgg => {
            let hatch_at = store.buy_egg(now)?;
            info!(%hatch_at, "Bought an egg");
            Ok(true)
        }
        SimAction::InstantHatch => {
            store.instant_hatch(now)?;
            info!("Egg incubation skipped");
            Ok(true)
        }
        SimAction::HatchEgg => {
            match store.hatch_egg(now, rng)? {
                HatchOutcome::NewPet { pet, name } => info!(%pet, name, "Egg hatched"),
                HatchOutcome::Completed => info!("Egg hatched but every pet is collected"),
            }
            Ok(true)
        }
    }
}
