//! Error types for the calpet-care crate.
//!
//! Every refused care action maps to one variant. The `Display` text is the
//! reason shown to the player; the state is never modified when an error is
//! returned.

use calpet_types::FoodId;

/// Errors returned by care actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CareError {
    /// Satisfaction is already at its maximum.
    #[error("the pet is already full (satisfaction {level}/{max})")]
    AlreadySatisfied {
        /// Current satisfaction level.
        level: u32,
        /// Configured maximum.
        max: u32,
    },

    /// The bath cooldown has not elapsed.
    #[error("bath is cooling down: {remaining_minutes} min remaining")]
    BathCoolingDown {
        /// Minutes until a bath is available, rounded up.
        remaining_minutes: i64,
    },

    /// No accelerant can be used because no cooldown is running.
    #[error("the bath is already available, no need to speed it up")]
    BathNotCooling,

    /// Today's accelerants are used up.
    #[error("bath accelerant limit reached ({used}/{cap} today)")]
    AccelerantCapReached {
        /// Accelerants used today.
        used: u32,
        /// Daily cap.
        cap: u32,
    },

    /// A toilet request is already open.
    #[error("a toilet request is already open")]
    ToiletAlreadyRequested,

    /// A toilet request was raised too recently.
    #[error("a toilet request was raised less than the minimum interval ago")]
    ToiletTooSoon,

    /// The food is not in the inventory in the requested quantity.
    #[error("not enough {food}: need {requested} but own {available}")]
    InsufficientFood {
        /// The food being consumed.
        food: FoodId,
        /// Units requested.
        requested: u32,
        /// Units owned.
        available: u32,
    },

    /// Inventory operations need a positive count.
    #[error("food count must be positive")]
    ZeroCount,

    /// No food is owned at all.
    #[error("no food in the inventory")]
    NoFoodOwned,

    /// There are no reward cards to spend.
    #[error("no affinity cards to spend")]
    NoAffinityCards,

    /// The current local hour is outside every feeding window.
    #[error("it is not feeding time (local hour {hour})")]
    OutsideFeedingWindow {
        /// Local hour of the attempt.
        hour: u32,
    },

    /// The current slot has already been fed today.
    #[error("the {slot} meal has already been served today")]
    SlotAlreadyFed {
        /// Name of the slot.
        slot: &'static str,
    },

    /// All meals for today have been served.
    #[error("daily meal limit reached ({limit})")]
    DailyFeedLimit {
        /// Meals allowed per day.
        limit: u32,
    },

    /// A counter would overflow.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}
