//! Settings error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating [`PceSettings`](crate::PceSettings).
///
/// A missing settings file is not an error (defaults apply), and bad `PCE_*`
/// environment values are ignored with a warning rather than reported here.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file {}: {source}", .path.display())]
    Io {
        /// Settings file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not JSON, or a field has the wrong type.
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    /// A value would leave the pipeline unable to work: a zero frame cap,
    /// character budget, or topic count, or an empty store path.
    #[error("invalid settings value for {key}: {reason}")]
    InvalidValue {
        /// Dotted camelCase key, e.g. `store.maxFrames`.
        key: &'static str,
        /// What the value must satisfy.
        reason: &'static str,
    },
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
