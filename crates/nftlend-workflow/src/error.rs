// Workflow errors
// The three ways an action can fail once the wallet has been asked to sign

use nftlend_error::{
    ErrorCode, ErrorDomain, LedgerError, LendingError, StoreError, WalletError,
    GENERIC_ERROR_MESSAGE,
};
use nftlend_types::TxHash;
use thiserror::Error;

use crate::state::{FailureKind, TransitionError};

/// Workflow error codes
pub mod codes {
    use nftlend_error::ErrorCode;

    // Workflow error codes start with 5000
    pub const SUBMISSION: ErrorCode = ErrorCode(5001);
    pub const FINALITY: ErrorCode = ErrorCode(5002);
    pub const RECONCILIATION: ErrorCode = ErrorCode(5003);
    pub const INVALID_TRANSITION: ErrorCode = ErrorCode(5004);
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    /// Signing or broadcast failed; nothing reached the ledger
    #[error("Submission failed: {0}")]
    Submission(#[from] WalletError),

    /// The transaction failed on-chain or never became final
    #[error("Finality wait failed: {0}")]
    Finality(#[from] LedgerError),

    /// The action is final on-chain but the record store was not updated
    #[error("Reconciliation of {tx_hash} failed: {source}")]
    Reconciliation {
        #[source]
        source: StoreError,
        tx_hash: TxHash,
    },

    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
}

impl WorkflowError {
    pub fn reconciliation(source: StoreError, tx_hash: TxHash) -> Self {
        WorkflowError::Reconciliation { source, tx_hash }
    }

    /// Step the failure belongs to. Transition errors are internal and get
    /// reported against submission, the first step with side effects.
    pub fn kind(&self) -> FailureKind {
        match self {
            WorkflowError::Submission(_) | WorkflowError::InvalidTransition(_) => {
                FailureKind::Submission
            }
            WorkflowError::Finality(_) => FailureKind::Finality,
            WorkflowError::Reconciliation { .. } => FailureKind::Reconciliation,
        }
    }

    /// The single line shown to the user.
    ///
    /// Only a record store rejection carries text worth showing; everything
    /// else collapses into the generic message.
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::Reconciliation { source, .. } => source
                .store_message()
                .filter(|message| !message.trim().is_empty())
                .unwrap_or(GENERIC_ERROR_MESSAGE)
                .to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Hash of a transaction that reached the ledger, if any
    pub fn committed_hash(&self) -> Option<&TxHash> {
        match self {
            WorkflowError::Reconciliation { tx_hash, .. } => Some(tx_hash),
            _ => None,
        }
    }
}

impl LendingError for WorkflowError {
    fn code(&self) -> ErrorCode {
        use codes::*;
        match self {
            WorkflowError::Submission(_) => SUBMISSION,
            WorkflowError::Finality(_) => FINALITY,
            WorkflowError::Reconciliation { .. } => RECONCILIATION,
            WorkflowError::InvalidTransition(_) => INVALID_TRANSITION,
        }
    }

    fn domain(&self) -> ErrorDomain {
        ErrorDomain::Workflow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_message_reaches_user() {
        let err = WorkflowError::reconciliation(
            StoreError::rejected(400, Some("Already grabbed".to_string())),
            TxHash::new("0xabc"),
        );
        assert_eq!(err.user_message(), "Already grabbed");
        assert_eq!(err.kind(), FailureKind::Reconciliation);
        assert_eq!(err.committed_hash(), Some(&TxHash::new("0xabc")));
    }

    #[test]
    fn test_generic_message_otherwise() {
        let unreachable = WorkflowError::reconciliation(
            StoreError::Unreachable("connection refused".to_string()),
            TxHash::new("0xabc"),
        );
        assert_eq!(unreachable.user_message(), GENERIC_ERROR_MESSAGE);

        let blank = WorkflowError::reconciliation(
            StoreError::rejected(500, Some("  ".to_string())),
            TxHash::new("0xabc"),
        );
        assert_eq!(blank.user_message(), GENERIC_ERROR_MESSAGE);

        let rejected: WorkflowError = WalletError::Rejected("User rejected".to_string()).into();
        assert_eq!(rejected.user_message(), GENERIC_ERROR_MESSAGE);
        assert!(rejected.committed_hash().is_none());

        let timeout: WorkflowError = LedgerError::Timeout {
            hash: "0xabc".to_string(),
            waited_ms: 20_000,
        }
        .into();
        assert_eq!(timeout.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(timeout.kind(), FailureKind::Finality);
    }

    #[test]
    fn test_codes_and_domain() {
        let err: WorkflowError = WalletError::Transport("bridge closed".to_string()).into();
        assert_eq!(err.code(), codes::SUBMISSION);
        assert_eq!(err.domain(), ErrorDomain::Workflow);
        assert!(!err.is_transient());
    }
}
