//! Shared type definitions for the Cal Pet care and economy engine.
//!
//! This crate is the single source of truth for the data shared across the
//! workspace: the persisted [`PetState`] aggregate, the compiled-in food and
//! pet catalogs, string identifiers, and the calendar used to derive day
//! keys. It contains no state-transition rules; those live in the
//! `calpet-ledger`, `calpet-care`, and `calpet-shop` crates.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe string wrappers for catalog identifiers and day keys
//! - [`calendar`] -- Calendar-local day boundaries ([`Calendar`])
//! - [`catalog`] -- Static food and pet reference tables
//! - [`structs`] -- The [`PetState`] aggregate and its embedded records

pub mod calendar;
pub mod catalog;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use calendar::{Calendar, CalendarError};
pub use catalog::{
    FOOD_CATALOG, FoodCatalogEntry, PET_CATALOG, PetCatalogEntry, Personality, STARTER_PET_ID,
    food_by_id, pet_by_id,
};
pub use ids::{DayKey, FoodId, PetId};
pub use structs::{NotificationPrefs, PetState, ShopItem};
