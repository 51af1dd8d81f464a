//! Error types for the calpet-shop crate.

use calpet_care::CareError;
use calpet_ledger::LedgerError;
use calpet_types::FoodId;

/// Errors returned by shop and egg actions. The state is never modified when
/// one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShopError {
    /// The item is not in today's line-up.
    #[error("{item} is not sold today")]
    ItemNotListed {
        /// Requested item.
        item: FoodId,
    },

    /// The item has already been bought today.
    #[error("{item} is sold out")]
    SoldOut {
        /// Requested item.
        item: FoodId,
    },

    /// The wallet cannot cover the price.
    #[error("not enough energy: {item} costs {price} kcal but the wallet holds {available} kcal")]
    InsufficientEnergy {
        /// Requested item.
        item: FoodId,
        /// Price of the item.
        price: u64,
        /// Wallet balance.
        available: u64,
    },

    /// The line-up lists an id the food catalog does not know.
    #[error("{item} is not a known food")]
    UnknownFood {
        /// Unrecognised id.
        item: FoodId,
    },

    /// Today's rerolls are used up.
    #[error("shop reroll limit reached ({used}/{cap} today)")]
    RerollCapReached {
        /// Rerolls used today.
        used: u32,
        /// Daily cap.
        cap: u32,
    },

    /// Every catalog pet is already collected.
    #[error("every pet has already been collected")]
    AllPetsOwned,

    /// An egg is already incubating.
    #[error("an egg is already incubating")]
    EggAlreadyOwned,

    /// Not enough reward cards for an egg.
    #[error("not enough affinity cards: need {required} but hold {held}")]
    NotEnoughCards {
        /// Cards needed.
        required: u32,
        /// Cards held.
        held: u32,
    },

    /// No egg is incubating.
    #[error("there is no egg to hatch")]
    NoEgg,

    /// Today's instant hatch was already used.
    #[error("instant hatch already used today")]
    InstantHatchUsed,

    /// The incubation time has not elapsed.
    #[error("the egg is not ready to hatch yet")]
    NotReadyToHatch,

    /// An inventory or affinity update failed.
    #[error(transparent)]
    Care(#[from] CareError),

    /// A wallet update failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
