//! Ledger Integration
//!
//! The workflow only needs one thing from the ledger once the wallet has
//! broadcast a transaction: block until that transaction is final, and learn
//! whether it succeeded.
//!
//! * **Client Interface**: `LedgerClient` and the status types in this file
//! * **Client Implementation**: `rest.rs` polls the full node REST API

use async_trait::async_trait;
use nftlend_error::LedgerResult;
use nftlend_types::TxHash;

pub mod rest;

pub use rest::RestLedgerClient;

//-----------------------------------------------------------------------------
// Core Ledger Types
//-----------------------------------------------------------------------------

/// A transaction the network has committed, successfully or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedTransaction {
    pub hash: TxHash,
    /// Ledger version the transaction was committed at
    pub version: Option<u64>,
    pub success: bool,
    /// Execution status reported by the VM
    pub vm_status: String,
}

/// Status of a transaction as seen by the node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Unknown to the node yet, or sitting in the mempool
    Pending,
    /// Committed; check `success` for the outcome
    Committed(CommittedTransaction),
}

//-----------------------------------------------------------------------------
// Ledger Client Trait
//-----------------------------------------------------------------------------

/// Read side of the ledger used by the action workflow
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Current status of a transaction.
    async fn transaction_status(&self, hash: &TxHash) -> LedgerResult<TransactionStatus>;

    /// Block until `hash` is final.
    ///
    /// Returns the committed transaction on success, `TransactionFailed` when
    /// execution failed, and `Timeout` when the client's own limit ran out.
    async fn wait_for_transaction(&self, hash: &TxHash) -> LedgerResult<CommittedTransaction>;
}
