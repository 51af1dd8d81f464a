//! Daily food shop and egg economy for Cal Pet.
//!
//! The shop offers a fresh line-up of catalog foods each calendar day, paid
//! for with settled energy from the wallet. Affinity reward cards buy eggs,
//! which hatch into pets the player has not collected yet.
//!
//! # Modules
//!
//! - [`config`] -- Shop and egg tunables ([`ShopConfig`]).
//! - [`error`] -- Error types for refused purchases.
//! - [`shop`] -- Daily line-up draw, purchases, and rerolls.
//! - [`egg`] -- Egg purchase, incubation, and hatching.
//!
//! Randomness is always injected as `&mut impl Rng` so tests can use a
//! seeded generator.

pub mod config;
pub mod egg;
pub mod error;
pub mod shop;

// Re-export primary types at crate root.
pub use config::ShopConfig;
pub use egg::{EggStatus, HatchOutcome, buy_egg, egg_status, hatch_egg, instant_hatch};
pub use error::ShopError;
pub use shop::{Purchase, buy_food, draw_items, ensure_daily_shop, reroll_shop};
