//! Error types for rotation configuration and snapshot restore.

use thiserror::Error;

/// Result type alias for rotation operations.
pub type RotationResult<T> = Result<T, RotationError>;

/// Errors raised while building or restoring a rotation scheduler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RotationError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}
