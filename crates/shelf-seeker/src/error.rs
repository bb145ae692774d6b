//! Error types for the seeker crate.

use thiserror::Error;

/// Errors that can occur when configuring queries or pagination.
#[derive(Debug, Error)]
pub enum SeekerError {
    /// Page size must hold at least one item.
    #[error("page size must be at least 1")]
    InvalidPageSize,
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
