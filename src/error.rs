//! Error types for settings persistence and overlay supervision

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reading or writing one of the JSON files
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure starting the overlay or publishing its configuration
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Missing {} next to the application.", .path.display())]
    MissingExecutable { path: PathBuf },

    #[error("Failed to start {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Config(#[from] PersistError),
}
