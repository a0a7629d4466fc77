//! Off-chain Record Store Interface
//!
//! The record store is the application's authoritative database of loan and
//! offer records. The client lists records for an account and, after an
//! on-chain action is final, tells the store about the new state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use nftlend_error::{StoreError, StoreResult};
use nftlend_types::{AccountAddress, ActionKind, Loan, LoanStatus};

pub mod http;

pub use http::HttpRecordStore;

//-----------------------------------------------------------------------------
// Wire Envelopes
//-----------------------------------------------------------------------------

/// `{ data: T }` envelope returned by listing routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Body of the reconciliation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub address: AccountAddress,
}

/// Success/failure envelope of update routes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Acknowledgement of a successful update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreAck {
    pub message: Option<String>,
}

//-----------------------------------------------------------------------------
// Record Store Trait
//-----------------------------------------------------------------------------

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records owned by `address` with the given status.
    async fn list_loans(&self, address: &AccountAddress, status: LoanStatus) -> StoreResult<Vec<Loan>>;

    /// Closed loans `address` took part in.
    async fn list_previous_loans(&self, address: &AccountAddress) -> StoreResult<Vec<Loan>>;

    /// Record that `address` completed `kind` on `record_id`.
    async fn record_action(
        &self,
        kind: ActionKind,
        record_id: &str,
        address: &AccountAddress,
    ) -> StoreResult<StoreAck>;

    /// Look a record up by id among `address`'s records with `status`.
    async fn find_loan(
        &self,
        address: &AccountAddress,
        status: LoanStatus,
        record_id: &str,
    ) -> StoreResult<Loan> {
        self.list_loans(address, status)
            .await?
            .into_iter()
            .find(|loan| loan.id == record_id)
            .ok_or_else(|| StoreError::NotFound(record_id.to_string()))
    }
}
