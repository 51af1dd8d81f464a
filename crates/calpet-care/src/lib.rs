//! Pet care rules for Cal Pet.
//!
//! Every rule in this crate is a plain function over
//! [`PetState`](calpet_types::PetState). Judgments take `&PetState` and never
//! mutate; actions take `&mut PetState`, run the daily boundary check first,
//! and either succeed or return a [`CareError`] leaving the state as it was.
//!
//! # Modules
//!
//! - [`config`] -- Tunable constants ([`CareConfig`]) and affinity rewards.
//! - [`error`] -- Error types for refused care actions.
//! - [`daily`] -- Day boundary reset of day-scoped fields.
//! - [`satisfaction`] -- Time-based satisfaction decay and feeding.
//! - [`bath`] -- Bath cooldown and its daily accelerant.
//! - [`toilet`] -- Toilet requests and the quick-response bonus window.
//! - [`feed_slot`] -- Stand-alone slot-based feeding policy.
//! - [`affinity`] -- Affinity meter that wraps into reward cards.
//! - [`inventory`] -- Owned food counts.
//! - [`pets`] -- Owned pet collection.

pub mod affinity;
pub mod bath;
pub mod config;
pub mod daily;
pub mod error;
pub mod feed_slot;
pub mod inventory;
pub mod pets;
pub mod satisfaction;
pub mod toilet;

// Re-export primary types at crate root.
pub use affinity::{AffinityGain, add_affinity, spend_affinity_card};
pub use bath::{BathStatus, apply_accelerant, can_bath, can_use_accelerant, mark_bath_done};
pub use config::{CareConfig, CareRewards};
pub use daily::{ensure_daily_reset, is_current_day};
pub use error::CareError;
pub use feed_slot::{FeedSlot, SlotFeedLog};
pub use inventory::{add_food, consume_food, first_owned_food, food_count};
pub use pets::{adopt_pet, ensure_initial_pets, unowned_pets};
pub use satisfaction::{
    FeedOutcome, SatisfactionReading, apply_decay, can_feed, compute_satisfaction,
    current_satisfaction, feed,
};
pub use toilet::{ToiletResolution, can_raise_flag, raise_flag, resolve};
