// Wallet session errors
// Raised while asking the connected wallet to sign and broadcast an action

use thiserror::Error;
use crate::{BoxError, ErrorCode, ErrorDomain, LendingError};

/// Wallet error codes
pub mod codes {
    use crate::ErrorCode;

    // Wallet error codes start with 1000
    pub const REJECTED: ErrorCode = ErrorCode(1001);
    pub const TRANSPORT: ErrorCode = ErrorCode(1003);
    pub const INVALID_RESPONSE: ErrorCode = ErrorCode(1004);
}

/// Wallet-specific error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The user declined the request in the wallet UI
    #[error("Wallet rejected the request: {0}")]
    Rejected(String),

    /// The wallet could not be reached
    #[error("Wallet transport error: {0}")]
    Transport(String),

    /// The wallet answered with something we could not decode
    #[error("Invalid wallet response: {0}")]
    InvalidResponse(String),
}

impl LendingError for WalletError {
    fn code(&self) -> ErrorCode {
        use codes::*;
        match self {
            WalletError::Rejected(_) => REJECTED,
            WalletError::Transport(_) => TRANSPORT,
            WalletError::InvalidResponse(_) => INVALID_RESPONSE,
        }
    }

    fn domain(&self) -> ErrorDomain {
        ErrorDomain::Wallet
    }

    fn is_transient(&self) -> bool {
        matches!(self, WalletError::Transport(_))
    }
}

/// Convenient Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;

impl From<WalletError> for BoxError {
    fn from(err: WalletError) -> Self {
        Box::new(err)
    }
}
