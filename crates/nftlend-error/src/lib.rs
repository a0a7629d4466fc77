// NFT lending error handling framework
// Central location for error types, codes, and the shared error trait

use std::fmt;
use std::error::Error as StdError;

// Re-export for downstream crates defining their own error enums
pub use thiserror;

// Module structure
mod config;
mod ledger;
mod store;
mod wallet;

// Public exports
pub use config::{ConfigError, ConfigResult};
pub use ledger::{LedgerError, LedgerResult};
pub use store::{StoreError, StoreResult};
pub use wallet::{WalletError, WalletResult};

/// Generic message shown to the user when no better text is available.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error has occured";

/// Error domains representing the collaborators of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorDomain {
    Wallet, Ledger, Store, Config, Workflow,
}
impl fmt::Display for ErrorDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorDomain::Wallet => write!(f, "wallet"),
            ErrorDomain::Ledger => write!(f, "ledger"),
            ErrorDomain::Store => write!(f, "store"),
            ErrorDomain::Config => write!(f, "config"),
            ErrorDomain::Workflow => write!(f, "workflow"),
        }
    }
}

/// Error code structure for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ErrorCode(pub u32);
impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Standard error message format for serialization
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ErrorMessage {
    pub code: ErrorCode,
    pub domain: ErrorDomain,
    pub message: String,
}

impl ErrorMessage {
    /// Build the serializable form of any lending error.
    pub fn from_error<E: LendingError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.code(),
            domain: error.domain(),
            message: error.to_string(),
        }
    }
}

/// Base trait for all errors raised by the lending client.
pub trait LendingError: StdError + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Numeric code, unique within the workspace.
    fn code(&self) -> ErrorCode;

    /// Collaborator this error originates from.
    fn domain(&self) -> ErrorDomain;

    /// Indicates if the error is temporary and a fresh attempt might succeed.
    fn is_transient(&self) -> bool { false }

    /// Converts the error into a boxed trait object.
    fn into_boxed(self) -> BoxError where Self: Sized { Box::new(self) }
}

/// Shorthand for a boxed LendingError
pub type BoxError = Box<dyn LendingError>;
/// Standard Result type using BoxError
pub type Result<T> = std::result::Result<T, BoxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display_is_zero_padded() {
        assert_eq!(ErrorCode(42).to_string(), "0042");
        assert_eq!(ErrorCode(3001).to_string(), "3001");
    }

    #[test]
    fn test_error_message_from_error() {
        let err = StoreError::rejected(409, Some("Already grabbed".to_string()));
        let msg = ErrorMessage::from_error(&err);
        assert_eq!(msg.domain, ErrorDomain::Store);
        assert_eq!(msg.code, store::codes::REJECTED);
        assert!(msg.message.contains("Already grabbed"));

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["domain"], serde_json::json!("Store"));
    }

    #[test]
    fn test_boxed_errors_keep_domain() {
        let boxed: BoxError = LedgerError::Rpc("connection reset".into()).into_boxed();
        assert_eq!(boxed.domain(), ErrorDomain::Ledger);
        assert!(boxed.is_transient());
    }
}
