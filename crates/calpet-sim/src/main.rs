//! Simulation harness for the Cal Pet engine.
//!
//! Replays one scripted day of play against a persisted install: health
//! samples arrive hourly, and the harness syncs, shops, feeds, bathes,
//! sleeps and hatches eggs at fixed local times. The plan plays on today,
//! or on the day after the last recorded activity when today was already
//! played, so running it repeatedly against the same state file continues
//! the same pet across successive days.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from the path given as the first argument, or
//!    `calpet-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the calendar from the configured UTC offset
//! 4. Load or create the state record
//! 5. Pick the day to replay and run the plan with a seeded generator
//! 6. Save the state record and log a summary
//!
//! # Environment
//!
//! - `RUST_LOG` overrides `logging.level`.
//! - `CALPET_STATE` overrides `storage.state_path`.
//! - `CALPET_SEED` sets the generator seed (default 42).

mod day;
mod error;
mod script;

use std::path::{Path, PathBuf};

use calpet_core::{EngineConfig, LoggingConfig, PetStore, ScriptedHealthSource};
use calpet_store::FileStore;
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::SimError;

/// Config file read when no path is given.
const DEFAULT_CONFIG_PATH: &str = "calpet-config.yaml";

/// Generator seed when `CALPET_SEED` is unset.
const DEFAULT_SEED: u64 = 42;

/// Application entry point for the simulation harness.
///
/// # Errors
///
/// Returns an error if configuration, the calendar, or the state record
/// cannot be loaded or saved.
fn main() -> Result<(), SimError> {
    // 1. Load configuration.
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config_found = config_path.exists();
    let config = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("calpet-sim starting");
    if config_found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    // 3. Build the calendar.
    let calendar = config.calendar.calendar()?;
    let now = Utc::now();
    info!(
        utc_offset_minutes = config.calendar.utc_offset_minutes,
        day = %calendar.day_key(now),
        "Calendar ready"
    );

    // 4. Load or create the state record.
    let file_store = FileStore::new(&config.storage.state_path);
    let (state, created) = file_store.load_or_create(now, &calendar)?;
    let mut store = PetStore::open(state, config)?;
    info!(
        path = %file_store.path().display(),
        created,
        wallet = store.state().wallet_energy,
        pets = store.state().owned_pet_ids.len(),
        "State record opened"
    );

    // 5. Replay the day.
    let day_start = script::replay_day_start(store.state(), now, &calendar);
    let seed = load_seed()?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let source = ScriptedHealthSource::new(script::day_samples(day_start, &mut rng));
    info!(day = %calendar.day_key(day_start), seed, "Replaying day plan");
    let summary = day::run_day(&mut store, script::DAY_PLAN, day_start, &source, &mut rng);

    // 6. Save and report.
    file_store.save(store.state())?;

    let end = script::DAY_PLAN
        .last()
        .map_or(day_start, |step| step.at(day_start));
    let state = store.state();
    info!(
        seed,
        performed = summary.performed,
        refused = summary.refused,
        wallet = state.wallet_energy,
        pending = state.pending_energy,
        satisfaction = store.satisfaction(end),
        affinity = state.affinity_point,
        cards = state.affinity_card_count,
        pets = state.owned_pet_ids.len(),
        current_pet = %state.current_pet_id,
        "Day complete"
    );

    Ok(())
}

/// Load the engine configuration from `path`, or defaults if it is absent.
///
/// Environment overrides apply either way.
fn load_config(path: &Path) -> Result<EngineConfig, SimError> {
    if path.exists() {
        Ok(EngineConfig::from_file(path)?)
    } else {
        let mut config = EngineConfig::default();
        config.storage.apply_env_overrides();
        Ok(config)
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

fn load_seed() -> Result<u64, SimError> {
    match std::env::var("CALPET_SEED") {
        Ok(value) => value.parse().map_err(|_| SimError::InvalidEnv {
            name: "CALPET_SEED",
            value,
        }),
        Err(_) => Ok(DEFAULT_SEED),
    }
}
