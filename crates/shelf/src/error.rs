//! Error types for the engine.

use std::path::PathBuf;

use shelf_ingest::IngestError;
use thiserror::Error;

/// Errors surfaced by [`Engine`](crate::Engine) and [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration could not be parsed or holds a value the engine cannot use.
    #[error("invalid configuration{}: {message}", location(.path))]
    Config {
        /// Source file, when loaded from disk.
        path: Option<PathBuf>,
        /// What is wrong.
        message: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog text could not be obtained.
    #[error("catalog load failed: {0}")]
    Load(#[from] IngestError),
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

impl EngineError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        EngineError::Config {
            path: None,
            message: message.into(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
