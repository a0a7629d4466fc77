//! Action Workflow Coordinator
//!
//! Runs one state-changing action end to end: precondition check, wallet
//! signature and broadcast, finality wait, record store update. Each step
//! starts only after the previous one succeeded and the first failure ends
//! the run. Nothing is retried and nothing is compensated.

use std::sync::Arc;

use tracing::{debug, error, info, info_span, warn, Instrument};

use nftlend_api::{LedgerClient, LedgerConfig, RecordStore, WalletSession};
use nftlend_types::{ActionKind, ActionRequest, AssetRegistry, Loan};

use crate::actions::{grab_request, withdraw_request};
use crate::error::WorkflowError;
use crate::outcome::{ActionReceipt, SkipReason, WorkflowOutcome};
use crate::state::{StateTracker, TransitionError, WorkflowState};

//-----------------------------------------------------------------------------
// Observation
//-----------------------------------------------------------------------------

/// One state change of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent {
    pub kind: ActionKind,
    pub record_id: String,
    pub from: WorkflowState,
    pub to: WorkflowState,
}

/// Receives every state change, e.g. to show progress in the UI
pub trait WorkflowObserver: Send + Sync {
    fn on_transition(&self, event: &TransitionEvent);
}

//-----------------------------------------------------------------------------
// Coordinator
//-----------------------------------------------------------------------------

/// Executes grab and withdraw actions against the ledger and record store.
///
/// The wallet session is passed per call and never kept. Invocations on
/// different records may run concurrently; the caller must not start a
/// second invocation on a record while one is in flight (see
/// [`InFlightActions`](crate::InFlightActions)).
pub struct ActionCoordinator {
    ledger: Arc<dyn LedgerClient>,
    store: Arc<dyn RecordStore>,
    ledger_config: LedgerConfig,
    observer: Option<Arc<dyn WorkflowObserver>>,
}

impl ActionCoordinator {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        store: Arc<dyn RecordStore>,
        ledger_config: LedgerConfig,
    ) -> Self {
        Self {
            ledger,
            store,
            ledger_config,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn WorkflowObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Address the lending module is published at
    pub fn contract_address(&self) -> &str {
        &self.ledger_config.contract_address
    }

    /// Claim the collateral of a defaulted loan.
    pub async fn grab(&self, loan: &Loan, wallet: &dyn WalletSession) -> WorkflowOutcome {
        self.run(ActionKind::Grab, &loan.id, wallet, |contract| {
            grab_request(contract, loan)
        })
        .await
    }

    /// Close an open offer. The settlement asset decides the function variant.
    pub async fn withdraw(
        &self,
        offer: &Loan,
        assets: &AssetRegistry,
        wallet: &dyn WalletSession,
    ) -> WorkflowOutcome {
        self.run(ActionKind::Withdraw, &offer.id, wallet, |contract| {
            withdraw_request(contract, offer, assets)
        })
        .await
    }

    /// Run a request built by the caller.
    pub async fn execute(&self, request: ActionRequest, wallet: &dyn WalletSession) -> WorkflowOutcome {
        let kind = request.kind;
        let record_id = request.record_id.clone();
        self.run(kind, &record_id, wallet, move |_| Ok(request)).await
    }

    async fn run<F>(
        &self,
        kind: ActionKind,
        record_id: &str,
        wallet: &dyn WalletSession,
        build: F,
    ) -> WorkflowOutcome
    where
        F: FnOnce(&str) -> Result<ActionRequest, SkipReason>,
    {
        let span = info_span!("lending_action", kind = %kind, record_id = %record_id);
        let mut run = Run {
            kind,
            record_id,
            tracker: StateTracker::new(),
            observer: self.observer.as_deref(),
        };

        match self.drive(&mut run, wallet, build).instrument(span).await {
            Ok(outcome) => outcome,
            Err(transition) => {
                error!(record_id = %record_id, error = %transition, "workflow left its transition table");
                WorkflowOutcome::Failed(transition.into())
            }
        }
    }

    async fn drive<F>(
        &self,
        run: &mut Run<'_>,
        wallet: &dyn WalletSession,
        build: F,
    ) -> Result<WorkflowOutcome, TransitionError>
    where
        F: FnOnce(&str) -> Result<ActionRequest, SkipReason>,
    {
        run.enter(WorkflowState::Validating)?;

        // Read the session once; it is never stored
        let account = match wallet.account() {
            Some(account) => account,
            None => return run.skip(SkipReason::NoAccount),
        };
        let request = match build(self.contract_address()) {
            Ok(request) => request,
            Err(reason) => return run.skip(reason),
        };
        if request.object.is_empty() {
            return run.skip(SkipReason::MissingObjectHandle);
        }

        run.enter(WorkflowState::AwaitingSignature)?;
        info!(function = %request.function, sender = %account, "requesting signature");
        let pending = match wallet.sign_and_submit(request.to_submission(&account)).await {
            Ok(pending) => pending,
            Err(err) => {
                warn!(error = %err, "wallet did not submit the transaction");
                return run.fail(WorkflowError::Submission(err));
            }
        };

        run.enter(WorkflowState::AwaitingFinality)?;
        info!(tx_hash = %pending.hash, "transaction submitted, waiting for finality");
        let committed = match self.ledger.wait_for_transaction(&pending.hash).await {
            Ok(committed) => committed,
            Err(err) => {
                warn!(tx_hash = %pending.hash, error = %err, "transaction did not finalize");
                return run.fail(WorkflowError::Finality(err));
            }
        };

        run.enter(WorkflowState::Reconciling)?;
        debug!(tx_hash = %pending.hash, version = ?committed.version, "updating record store");
        match self
            .store
            .record_action(request.kind, &request.record_id, &account)
            .await
        {
            Ok(ack) => {
                if let Some(message) = ack.message {
                    debug!(message = %message, "record store acknowledged update");
                }
            }
            Err(err) => {
                // The ledger already holds the action; an operator has to fix the record
                error!(
                    tx_hash = %pending.hash,
                    record_id = %request.record_id,
                    error = %err,
                    "action is final on-chain but the record store was not updated"
                );
                return run.fail(WorkflowError::reconciliation(err, pending.hash));
            }
        }

        run.enter(WorkflowState::Done)?;
        info!(tx_hash = %pending.hash, "action completed");
        Ok(WorkflowOutcome::Completed(ActionReceipt {
            kind: request.kind,
            record_id: request.record_id,
            explorer_url: self.ledger_config.explorer_txn_url(&pending.hash),
            headline: request.kind.success_message().to_string(),
            version: committed.version,
            tx_hash: pending.hash,
        }))
    }
}

//-----------------------------------------------------------------------------
// Per-invocation Bookkeeping
//-----------------------------------------------------------------------------

struct Run<'a> {
    kind: ActionKind,
    record_id: &'a str,
    tracker: StateTracker,
    observer: Option<&'a dyn WorkflowObserver>,
}

impl Run<'_> {
    fn enter(&mut self, next: WorkflowState) -> Result<(), TransitionError> {
        let from = self.tracker.advance(next)?;
        debug!(from = %from, to = %next, "workflow transition");
        if let Some(observer) = self.observer {
            observer.on_transition(&TransitionEvent {
                kind: self.kind,
                record_id: self.record_id.to_string(),
                from,
                to: next,
            });
        }
        Ok(())
    }

    fn skip(&mut self, reason: SkipReason) -> Result<WorkflowOutcome, TransitionError> {
        self.enter(WorkflowState::Skipped)?;
        debug!(reason = %reason, "action skipped");
        Ok(WorkflowOutcome::Skipped(reason))
    }

    fn fail(&mut self, err: WorkflowError) -> Result<WorkflowOutcome, TransitionError> {
        self.enter(WorkflowState::Failed(err.kind()))?;
        Ok(WorkflowOutcome::Failed(err))
    }
}
