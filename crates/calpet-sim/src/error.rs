//! Error types for the simulation harness binary.

/// Top-level error for the simulation harness.
///
/// Each variant wraps a subsystem error so that `main` can propagate with
/// `?`. Refused game actions are not errors here; the harness logs them and
/// carries on.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: calpet_core::ConfigError,
    },

    /// Loading or saving the state record failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying persistence error.
        #[from]
        source: calpet_store::StoreError,
    },

    /// The pet store could not be opened or hit an internal failure.
    #[error("engine error: {source}")]
    Core {
        /// The underlying engine error.
        #[from]
        source: calpet_core::CoreError,
    },

    /// The configured calendar is invalid.
    #[error("calendar error: {source}")]
    Calendar {
        /// The underlying calendar error.
        #[from]
        source: calpet_types::CalendarError,
    },

    /// An environment variable held an unusable value.
    #[error("invalid {name}: {value}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}
