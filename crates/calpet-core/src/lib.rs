//! Orchestration layer for the Cal Pet engine.
//!
//! The rule crates (`calpet-ledger`, `calpet-care`, `calpet-shop`) are plain
//! functions over [`PetState`](calpet_types::PetState). This crate wraps them
//! in a single owner, [`PetStore`], that every host action goes through. The
//! store runs the day rollover before each action, grants care rewards, and
//! talks to the health collaborator.
//!
//! # Modules
//!
//! - [`config`] -- Engine configuration loaded from YAML.
//! - [`health`] -- Health collaborator trait and in-memory implementations.
//! - [`rollover`] -- Calendar day rollover across all day-scoped fields.
//! - [`store`] -- The [`PetStore`] aggregate owner and its actions.

pub mod config;
pub mod health;
pub mod rollover;
pub mod store;

pub use config::{CalendarConfig, ConfigError, EngineConfig, LoggingConfig, StorageConfig};
pub use health::{
    HealthError, HealthSample, HealthSource, HealthTotals, ScriptedHealthSource,
    UnavailableHealthSource,
};
pub use rollover::roll_over_day;
pub use store::{CoreError, FedOutcome, PetStore, SyncOutcome, ToiletTap};
