//! Error types for the calpet-store crate.

/// Errors that can occur while loading or saving the state record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the record file failed.
    #[error("state file I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The record could not be encoded or decoded.
    #[error("state record JSON is invalid: {source}")]
    Json {
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

impl From<serde_json::Error> for StoreError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}
