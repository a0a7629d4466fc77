//! Workflow outcomes
//!
//! Every invocation ends in exactly one `WorkflowOutcome`. The presentation
//! layer turns it into at most one notification.

use std::fmt;

use nftlend_types::{ActionKind, TxHash};

use crate::error::WorkflowError;

/// Why an invocation stopped before contacting anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No wallet account is connected
    NoAccount,
    /// The record has no on-chain object handle for this action
    MissingObjectHandle,
    /// The record's settlement asset is not in the registry
    UnknownSettlementAsset(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoAccount => write!(f, "no account connected"),
            SkipReason::MissingObjectHandle => write!(f, "record has no object handle"),
            SkipReason::UnknownSettlementAsset(asset) => {
                write!(f, "unknown settlement asset {}", asset)
            }
        }
    }
}

/// Proof that an action is final on-chain and recorded off-chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReceipt {
    pub kind: ActionKind,
    pub record_id: String,
    pub tx_hash: TxHash,
    /// Ledger version the transaction was committed at
    pub version: Option<u64>,
    /// Headline shown to the user
    pub headline: String,
    /// Block explorer page for the transaction
    pub explorer_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    Completed(ActionReceipt),
    Skipped(SkipReason),
    Failed(WorkflowError),
}

/// Severity of a user notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// The one message the user sees after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub link: Option<String>,
}

impl WorkflowOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, WorkflowOutcome::Completed(_))
    }

    pub fn receipt(&self) -> Option<&ActionReceipt> {
        match self {
            WorkflowOutcome::Completed(receipt) => Some(receipt),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        match self {
            WorkflowOutcome::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// User-facing notification; skips are silent.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            WorkflowOutcome::Completed(receipt) => Some(Notification {
                level: NotificationLevel::Success,
                message: receipt.headline.clone(),
                link: Some(receipt.explorer_url.clone()),
            }),
            WorkflowOutcome::Skipped(_) => None,
            WorkflowOutcome::Failed(error) => Some(Notification {
                level: NotificationLevel::Error,
                message: error.user_message(),
                link: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nftlend_error::{StoreError, WalletError, GENERIC_ERROR_MESSAGE};

    #[test]
    fn test_skip_is_silent() {
        assert!(WorkflowOutcome::Skipped(SkipReason::NoAccount)
            .notification()
            .is_none());
    }

    #[test]
    fn test_completed_notification() {
        let outcome = WorkflowOutcome::Completed(ActionReceipt {
            kind: ActionKind::Grab,
            record_id: "loan-1".to_string(),
            tx_hash: TxHash::new("0xabc"),
            version: Some(12),
            headline: "NFT Grabbed".to_string(),
            explorer_url: "https://explorer.aptoslabs.com/txn/0xabc?network=testnet".to_string(),
        });
        let note = outcome.notification().unwrap();
        assert_eq!(note.level, NotificationLevel::Success);
        assert_eq!(note.message, "NFT Grabbed");
        assert!(note.link.unwrap().contains("/txn/0xabc"));
    }

    #[test]
    fn test_failed_notification() {
        let failed = WorkflowOutcome::Failed(WorkflowError::reconciliation(
            StoreError::rejected(409, Some("Already grabbed".to_string())),
            TxHash::new("0xabc"),
        ));
        assert_eq!(failed.notification().unwrap().message, "Already grabbed");

        let rejected = WorkflowOutcome::Failed(WalletError::Rejected("no".to_string()).into());
        let note = rejected.notification().unwrap();
        assert_eq!(note.level, NotificationLevel::Error);
        assert_eq!(note.message, GENERIC_ERROR_MESSAGE);
        assert!(note.link.is_none());
    }
}
