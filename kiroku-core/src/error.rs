//! # Error Handling
//!
//! Error types for KirokuDB operations.
//!
//! ## Design Principles
//!
//! 1. **Actionable**: Every error should guide the caller toward resolution
//! 2. **Contextual**: Errors include relevant context (keys, limits)
//! 3. **Local**: Errors are reported at the API boundary; the store never
//!    retries internally

use thiserror::Error;

/// Result type alias for KirokuDB operations
pub type Result<T> = std::result::Result<T, Error>;

/// Primary error type for KirokuDB
#[derive(Error, Debug)]
pub enum Error {
    /// Key space or byte space would overflow. The reservation that failed
    /// stays consumed; subsequent reservations will fail the same way.
    #[error("capacity exceeded: {resource} limit of {limit} reached")]
    CapacityExceeded { resource: &'static str, limit: u64 },

    /// The key is beyond the published tail, or tombstoned relative to the
    /// reader's snapshot.
    #[error("key {key} not found")]
    NotFound { key: u32 },

    /// Payload rejected before any tail reservation was consumed.
    #[error("invalid payload: {message}")]
    InvalidPayload { message: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::CapacityExceeded { .. } => false,
            Error::NotFound { .. } => true,
            Error::InvalidPayload { .. } => true,
            Error::Configuration { .. } => false,
        }
    }

    /// Get error code for monitoring
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            Error::NotFound { .. } => "NOT_FOUND",
            Error::InvalidPayload { .. } => "INVALID_PAYLOAD",
            Error::Configuration { .. } => "CONFIG_ERROR",
        }
    }
}
