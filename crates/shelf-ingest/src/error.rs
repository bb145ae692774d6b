//! Error types for catalog ingestion.
//!
//! Parsing itself never fails: short rows, nameless rows and broken quoting
//! are recovered locally and only counted. Errors come from obtaining the
//! text in the first place, or from parse options that cannot work.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading catalog text.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to read a source file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source could not produce any text.
    #[error("source {name} is unavailable: {reason}")]
    Unavailable { name: String, reason: String },

    /// A parse option has a value the parser cannot use.
    #[error("invalid parse option {option}: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IngestError::Unavailable {
            name: "catalog".to_string(),
            reason: "HTTP 404".to_string(),
        };
        assert_eq!(err.to_string(), "source catalog is unavailable: HTTP 404");
    }

    #[test]
    fn read_error_keeps_source() {
        let err = IngestError::Read {
            path: PathBuf::from("/data/catalog.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().starts_with("failed to read /data/catalog.csv"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
