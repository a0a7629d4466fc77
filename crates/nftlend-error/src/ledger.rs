// Ledger errors
// Raised while waiting for a submitted transaction to reach finality

use thiserror::Error;
use crate::{BoxError, ErrorCode, ErrorDomain, LendingError};

/// Ledger error codes
pub mod codes {
    use crate::ErrorCode;

    // Ledger error codes start with 2000
    pub const TRANSACTION_FAILED: ErrorCode = ErrorCode(2001);
    pub const TIMEOUT: ErrorCode = ErrorCode(2002);
    pub const RPC: ErrorCode = ErrorCode(2003);
    pub const DECODING: ErrorCode = ErrorCode(2004);
}

/// Ledger-specific error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The network committed the transaction but execution failed
    #[error("Transaction {hash} failed: {vm_status}")]
    TransactionFailed { hash: String, vm_status: String },

    /// The transaction did not reach a terminal status in time
    #[error("Timed out after {waited_ms}ms waiting for transaction {hash}")]
    Timeout { hash: String, waited_ms: u64 },

    /// The node could not be queried
    #[error("Ledger RPC error: {0}")]
    Rpc(String),

    /// The node answered with something we could not decode
    #[error("Ledger decoding error: {0}")]
    Decoding(String),
}

impl LendingError for LedgerError {
    fn code(&self) -> ErrorCode {
        use codes::*;
        match self {
            LedgerError::TransactionFailed { .. } => TRANSACTION_FAILED,
            LedgerError::Timeout { .. } => TIMEOUT,
            LedgerError::Rpc(_) => RPC,
            LedgerError::Decoding(_) => DECODING,
        }
    }

    fn domain(&self) -> ErrorDomain {
        ErrorDomain::Ledger
    }

    fn is_transient(&self) -> bool {
        matches!(self, LedgerError::Rpc(_) | LedgerError::Timeout { .. })
    }
}

/// Convenient Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<LedgerError> for BoxError {
    fn from(err: LedgerError) -> Self {
        Box::new(err)
    }
}
