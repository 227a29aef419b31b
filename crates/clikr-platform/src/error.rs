//! Common error types for clikr-platform.

use thiserror::Error;

/// Platform-level errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("input backend unavailable: {0}")]
    DeviceUnavailable(String),
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
