// Record store errors
// Raised by the off-chain HTTP API holding loan and offer records

use thiserror::Error;
use crate::{BoxError, ErrorCode, ErrorDomain, LendingError};

/// Record store error codes
pub mod codes {
    use crate::ErrorCode;

    // Store error codes start with 3000
    pub const REJECTED: ErrorCode = ErrorCode(3001);
    pub const UNREACHABLE: ErrorCode = ErrorCode(3002);
    pub const DECODING: ErrorCode = ErrorCode(3003);
    pub const NOT_FOUND: ErrorCode = ErrorCode(3004);
}

/// Record store error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store answered with a non-success status
    #[error("Record store rejected the request (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    /// The store could not be reached
    #[error("Record store unreachable: {0}")]
    Unreachable(String),

    /// The response body did not match the expected envelope
    #[error("Record store decoding error: {0}")]
    Decoding(String),

    /// No record with the given identifier
    #[error("Record not found: {0}")]
    NotFound(String),
}

impl LendingError for StoreError {
    fn code(&self) -> ErrorCode {
        use codes::*;
        match self {
            StoreError::Rejected { .. } => REJECTED,
            StoreError::Unreachable(_) => UNREACHABLE,
            StoreError::Decoding(_) => DECODING,
            StoreError::NotFound(_) => NOT_FOUND,
        }
    }

    fn domain(&self) -> ErrorDomain {
        ErrorDomain::Store
    }

    fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unreachable(_))
    }
}

/// Convenient Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for BoxError {
    fn from(err: StoreError) -> Self {
        Box::new(err)
    }
}

impl StoreError {
    /// Create a new rejection error
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        StoreError::Rejected { status, message }
    }

    /// Message supplied by the store itself, if any
    pub fn store_message(&self) -> Option<&str> {
        match self {
            StoreError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
