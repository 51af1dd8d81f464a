//! Persistence layer for Cal Pet.
//!
//! The state is stored as one flat record per install. Nested collections
//! (the shop line-up, the food inventory, the owned pet list) are embedded
//! in the record as JSON strings, matching the layout of the mobile app's
//! store. Encoding and decoding those blobs happens only here; the rest of
//! the engine sees typed fields.
//!
//! # Modules
//!
//! - [`record`] -- The flat [`PetRecord`] and its conversion to and from
//!   [`PetState`](calpet_types::PetState).
//! - [`file_store`] -- [`FileStore`], a JSON file with atomic saves.
//! - [`error`] -- Error types for persistence.

pub mod error;
pub mod file_store;
pub mod record;

pub use error::StoreError;
pub use file_store::FileStore;
pub use record::PetRecord;
