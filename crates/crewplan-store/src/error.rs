//! Error types for the hand-off file

use std::path::{Path, PathBuf};

/// Errors reading or writing a hand-off file
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("io error at {path}: {source}")]
    Io {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, or JSON that does not fit the plan types
    #[error("invalid json in {path}: {source}")]
    Json {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Neither a `tasks` nor a `phases` array at the top level
    #[error("{path} has neither a \"tasks\" nor a \"phases\" array")]
    UnrecognizedShape {
        /// File involved
        path: PathBuf,
    },
}

impl StoreError {
    /// Create IO error for path
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create JSON error for path
    pub fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
