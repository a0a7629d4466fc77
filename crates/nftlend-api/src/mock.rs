//! Mock Collaborators
//!
//! In-memory implementations of the wallet, ledger and record store traits
//! for testing without a network. Each mock records the calls it receives so
//! tests can assert on exactly which side effects happened.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use nftlend_error::{LedgerError, LedgerResult, StoreError, StoreResult, WalletError, WalletResult};
use nftlend_types::{AccountAddress, ActionKind, Loan, LoanStatus, TransactionSubmission, TxHash};

use crate::chain::{CommittedTransaction, LedgerClient, TransactionStatus};
use crate::store::{RecordStore, StoreAck};
use crate::wallet::{PendingTransaction, WalletSession};

//-----------------------------------------------------------------------------
// Mock Wallet
//-----------------------------------------------------------------------------

/// Wallet that approves (or rejects) every request without user interaction
pub struct MockWallet {
    account: Option<AccountAddress>,
    rejection: Option<WalletError>,
    submissions: Arc<Mutex<Vec<TransactionSubmission>>>,
}

impl MockWallet {
    /// Wallet with `account` connected
    pub fn connected(account: AccountAddress) -> Self {
        Self {
            account: Some(account),
            rejection: None,
            submissions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Wallet with no account connected
    pub fn disconnected() -> Self {
        Self {
            account: None,
            rejection: None,
            submissions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail every sign request with `error`
    pub fn rejecting(mut self, error: WalletError) -> Self {
        self.rejection = Some(error);
        self
    }

    /// Every submission received, in order
    pub fn submissions(&self) -> Vec<TransactionSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    /// Hash handed out for the n-th submission
    pub fn hash_for(index: usize) -> TxHash {
        TxHash::new(format!("0x{:064x}", index + 1))
    }
}

#[async_trait]
impl WalletSession for MockWallet {
    fn account(&self) -> Option<AccountAddress> {
        self.account.clone()
    }

    async fn sign_and_submit(
        &self,
        submission: TransactionSubmission,
    ) -> WalletResult<PendingTransaction> {
        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(submission);
        if let Some(error) = &self.rejection {
            return Err(error.clone());
        }
        Ok(PendingTransaction {
            hash: Self::hash_for(submissions.len() - 1),
        })
    }
}

//-----------------------------------------------------------------------------
// Mock Ledger
//-----------------------------------------------------------------------------

/// Ledger where every transaction is final on the first wait
pub struct MockLedger {
    version: Mutex<u64>,
    failure: Option<LedgerError>,
    waits: Arc<Mutex<Vec<TxHash>>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            version: Mutex::new(1),
            failure: None,
            waits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail every finality wait with `error`
    pub fn failing(mut self, error: LedgerError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Hashes waited on, in order
    pub fn waits(&self) -> Vec<TxHash> {
        self.waits.lock().unwrap().clone()
    }

    pub fn wait_count(&self) -> usize {
        self.waits.lock().unwrap().len()
    }
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn transaction_status(&self, hash: &TxHash) -> LedgerResult<TransactionStatus> {
        let version = *self.version.lock().unwrap();
        Ok(TransactionStatus::Committed(CommittedTransaction {
            hash: hash.clone(),
            version: Some(version),
            success: self.failure.is_none(),
            vm_status: "Executed successfully".to_string(),
        }))
    }

    async fn wait_for_transaction(&self, hash: &TxHash) -> LedgerResult<CommittedTransaction> {
        self.waits.lock().unwrap().push(hash.clone());
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        let mut version = self.version.lock().unwrap();
        *version += 1;
        Ok(CommittedTransaction {
            hash: hash.clone(),
            version: Some(*version),
            success: true,
            vm_status: "Executed successfully".to_string(),
        })
    }
}

//-----------------------------------------------------------------------------
// Mock Record Store
//-----------------------------------------------------------------------------

/// A reconciliation call received by the mock store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAction {
    pub kind: ActionKind,
    pub record_id: String,
    pub address: AccountAddress,
}

/// Record store holding loans in memory
pub struct MockRecordStore {
    loans: Mutex<Vec<Loan>>,
    previous: Mutex<HashMap<AccountAddress, Vec<Loan>>>,
    rejection: Option<StoreError>,
    actions: Arc<Mutex<Vec<RecordedAction>>>,
    list_calls: Mutex<usize>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self {
            loans: Mutex::new(Vec::new()),
            previous: Mutex::new(HashMap::new()),
            rejection: None,
            actions: Arc::new(Mutex::new(Vec::new())),
            list_calls: Mutex::new(0),
        }
    }

    pub fn with_loans(loans: Vec<Loan>) -> Self {
        let store = Self::new();
        *store.loans.lock().unwrap() = loans;
        store
    }

    /// Reject every update with `error`
    pub fn rejecting(mut self, error: StoreError) -> Self {
        self.rejection = Some(error);
        self
    }

    pub fn set_previous(&self, address: AccountAddress, loans: Vec<Loan>) {
        self.previous.lock().unwrap().insert(address, loans);
    }

    /// Every update received, in order
    pub fn actions(&self) -> Vec<RecordedAction> {
        self.actions.lock().unwrap().clone()
    }

    pub fn action_count(&self) -> usize {
        self.actions.lock().unwrap().len()
    }

    /// Listing calls, of either kind
    pub fn list_count(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    /// Total calls of any kind
    pub fn call_count(&self) -> usize {
        self.action_count() + self.list_count()
    }
}

impl Default for MockRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn list_loans(&self, address: &AccountAddress, status: LoanStatus) -> StoreResult<Vec<Loan>> {
        *self.list_calls.lock().unwrap() += 1;
        Ok(self
            .loans
            .lock()
            .unwrap()
            .iter()
            .filter(|loan| loan.status == status)
            .filter(|loan| &loan.address == address)
            .cloned()
            .collect())
    }

    async fn list_previous_loans(&self, address: &AccountAddress) -> StoreResult<Vec<Loan>> {
        *self.list_calls.lock().unwrap() += 1;
        Ok(self
            .previous
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_default())
    }

    async fn record_action(
        &self,
        kind: ActionKind,
        record_id: &str,
        address: &AccountAddress,
    ) -> StoreResult<StoreAck> {
        self.actions.lock().unwrap().push(RecordedAction {
            kind,
            record_id: record_id.to_string(),
            address: address.clone(),
        });
        if let Some(error) = &self.rejection {
            return Err(error.clone());
        }

        let new_status = match kind {
            ActionKind::Grab => LoanStatus::Grabbed,
            ActionKind::Withdraw => LoanStatus::Withdrawn,
        };
        if let Some(loan) = self
            .loans
            .lock()
            .unwrap()
            .iter_mut()
            .find(|loan| loan.id == record_id)
        {
            loan.status = new_status;
        }
        Ok(StoreAck::default())
    }
}
