//! Eggs: bought with affinity cards, incubated, hatched into a new pet.
//!
//! At most one egg incubates at a time. Once per day the incubation can be
//! skipped with an instant hatch.

use calpet_care::ensure_daily_reset;
use calpet_care::pets::{adopt_pet, unowned_pets};
use calpet_types::{Calendar, PetId, PetState};
use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use tracing::info;

use crate::config::ShopConfig;
use crate::error::ShopError;

/// Where the egg is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggStatus {
    /// No egg is owned.
    None,
    /// The egg is incubating.
    Incubating {
        /// Time until it can hatch.
        remaining: TimeDelta,
    },
    /// The egg can hatch now.
    Ready,
}

/// Result of a successful hatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HatchOutcome {
    /// A pet that was not yet collected joined and became current.
    NewPet {
        /// Id of the new pet.
        pet: PetId,
        /// Its display name.
        name: &'static str,
    },
    /// Every pet was already collected; the egg was discarded.
    Completed,
}

/// Egg life-cycle status at `now`. Pure.
pub fn egg_status(state: &PetState, now: DateTime<Utc>) -> EggStatus {
    if !state.egg_owned {
        return EggStatus::None;
    }
    match state.egg_hatch_at {
        Some(hatch_at) if now >= hatch_at => EggStatus::Ready,
        Some(hatch_at) => EggStatus::Incubating {
            remaining: hatch_at.signed_duration_since(now),
        },
        // An egg without a hatch time never becomes ready on its own.
        None => EggStatus::Incubating {
            remaining: TimeDelta::MAX,
        },
    }
}

/// Buy an egg with reward cards. Returns when it will be ready to hatch.
///
/// Checks run in order: a pet is left to collect, no egg is incubating,
/// enough cards are held.
///
/// # Errors
///
/// [`ShopError::AllPetsOwned`], [`ShopError::EggAlreadyOwned`], or
/// [`ShopError::NotEnoughCards`].
pub fn buy_egg(
    state: &mut PetState,
    now: DateTime<Utc>,
    config: &ShopConfig,
) -> Result<DateTime<Utc>, ShopError> {
    if unowned_pets(state).is_empty() {
        return Err(ShopError::AllPetsOwned);
    }
    if state.egg_owned {
        return Err(ShopError::EggAlreadyOwned);
    }
    let held = state.affinity_card_count;
    let required = config.egg_card_price.max(1);
    let left = held
        .checked_sub(required)
        .ok_or(ShopError::NotEnoughCards { required, held })?;
    let hatch_at = now
        .checked_add_signed(config.hatch_delay())
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    state.affinity_card_count = left;
    state.egg_owned = true;
    state.egg_hatch_at = Some(hatch_at);
    info!(cards_left = left, %hatch_at, "Egg bought");
    Ok(hatch_at)
}

/// Make the incubating egg hatchable right away. Once per calendar day.
///
/// Runs the daily reset first, so a use on an earlier day never blocks
/// today's.
///
/// # Errors
///
/// [`ShopError::NoEgg`] or [`ShopError::InstantHatchUsed`].
pub fn instant_hatch(
    state: &mut PetState,
    now: DateTime<Utc>,
    calendar: &Calendar,
) -> Result<(), ShopError> {
    let _ = ensure_daily_reset(state, now, calendar);
    if !state.egg_owned {
        return Err(ShopError::NoEgg);
    }
    if state.egg_instant_hatch_used_today {
        return Err(ShopError::InstantHatchUsed);
    }
    state.egg_instant_hatch_used_today = true;
    state.egg_hatch_at = Some(now);
    info!("Instant hatch used");
    Ok(())
}

/// Hatch the egg into a uniformly chosen pet not yet collected.
///
/// If every pet is already collected the egg is discarded and
/// [`HatchOutcome::Completed`] is returned.
///
/// # Errors
///
/// [`ShopError::NoEgg`] or [`ShopError::NotReadyToHatch`].
pub fn hatch_egg(
    state: &mut PetState,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<HatchOutcome, ShopError> {
    match egg_status(state, now) {
        EggStatus::None => return Err(ShopError::NoEgg),
        EggStatus::Incubating { .. } => return Err(ShopError::NotReadyToHatch),
        EggStatus::Ready => {}
    }

    let candidates = unowned_pets(state);
    let picked = if candidates.is_empty() {
        None
    } else {
        candidates.get(rng.random_range(0..candidates.len())).copied()
    };

    state.egg_owned = false;
    state.egg_hatch_at = None;

    let Some(entry) = picked else {
        info!("Egg hatched with every pet already collected");
        return Ok(HatchOutcome::Completed);
    };
    let pet = PetId::from(entry.id);
    adopt_pet(state, pet.clone());
    info!(pet = %pet, name = entry.name, "Egg hatched");
    Ok(HatchOutcome::NewPet {
        pet,
        name: entry.name,
    })
}
