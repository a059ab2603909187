//! Memory pipeline error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors surfaced by the frame store and the context engine.
///
/// Corrupt or partial records are not errors: the store skips or defaults
/// them. Only I/O failures and rejected input reach the caller.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// The frame log could not be read or written.
    #[error("failed to {operation} frame log {}: {source}", .path.display())]
    Io {
        /// What was being attempted (`open`, `append to`, `rewrite`, ...).
        operation: &'static str,
        /// Path of the frame log.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A frame could not be encoded as JSON.
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),

    /// A required message was empty after trimming; nothing was written.
    #[error("no {0} message entered")]
    EmptyInput(&'static str),
}

impl MemoryError {
    pub(crate) fn io(operation: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for memory operations.
pub type Result<T> = std::result::Result<T, MemoryError>;
