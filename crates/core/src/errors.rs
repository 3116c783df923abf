//! Core error types for the change-propagation layer.
//!
//! Errors raised here sit on the write path of the entity-management API:
//! they are returned to the committing caller and are never swallowed.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for lifecycle dispatch and cache invalidation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cache operation failed: {0}")]
    Cache(String),

    #[error("Cache partition '{0}' is not declared")]
    UnknownPartition(String),

    #[error("Failed to (de)serialize cached value: {0}")]
    Serialization(#[from] serde_json::Error),
}
