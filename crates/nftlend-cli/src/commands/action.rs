//! Grab and withdraw commands

use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

use nftlend_api::WalletSession;
use nftlend_types::LoanStatus;
use nftlend_workflow::{TransitionEvent, WorkflowObserver, WorkflowOutcome, WorkflowState};

use super::AppContext;
use crate::error::workflow_failure;

/// Prints a progress line for each step that waits on someone else
pub struct ProgressObserver;

impl ProgressObserver {
    pub fn message(state: WorkflowState) -> Option<&'static str> {
        match state {
            WorkflowState::AwaitingSignature => Some("Waiting for wallet approval..."),
            WorkflowState::AwaitingFinality => Some("Waiting for the transaction to finalize..."),
            WorkflowState::Reconciling => Some("Updating loan records..."),
            _ => None,
        }
    }
}

impl WorkflowObserver for ProgressObserver {
    fn on_transition(&self, event: &TransitionEvent) {
        if let Some(message) = Self::message(event.to) {
            eprintln!("{}", message.dimmed());
        }
    }
}

pub async fn handle_grab_command(ctx: &AppContext, record_id: &str) -> Result<()> {
    let wallet = ctx.connect_wallet().await?;
    let Some(account) = wallet.account() else {
        debug!(record_id = %record_id, "no wallet account connected, nothing to grab");
        return Ok(());
    };

    let loan = ctx
        .store
        .find_loan(&account, LoanStatus::Borrowed, record_id)
        .await
        .with_context(|| format!("failed to look up loan {}", record_id))?;

    let coordinator = ctx.coordinator().with_observer(Arc::new(ProgressObserver));
    report_outcome(coordinator.grab(&loan, &wallet).await)
}

pub async fn handle_withdraw_command(ctx: &AppContext, offer_id: &str) -> Result<()> {
    let wallet = ctx.connect_wallet().await?;
    let Some(account) = wallet.account() else {
        debug!(offer_id = %offer_id, "no wallet account connected, nothing to withdraw");
        return Ok(());
    };

    let offer = ctx
        .store
        .find_loan(&account, LoanStatus::Offered, offer_id)
        .await
        .with_context(|| format!("failed to look up offer {}", offer_id))?;

    let coordinator = ctx.coordinator().with_observer(Arc::new(ProgressObserver));
    report_outcome(coordinator.withdraw(&offer, &ctx.assets, &wallet).await)
}

/// Print the one notification an outcome produces; failures become errors.
pub fn report_outcome(outcome: WorkflowOutcome) -> Result<()> {
    match outcome {
        WorkflowOutcome::Completed(receipt) => {
            println!("{} {}", "✓".green(), receipt.headline.green().bold());
            println!("  View Txn: {}", receipt.explorer_url);
            Ok(())
        }
        WorkflowOutcome::Skipped(reason) => {
            debug!(reason = %reason, "action skipped");
            Ok(())
        }
        WorkflowOutcome::Failed(error) => Err(workflow_failure(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nftlend_error::StoreError;
    use nftlend_types::TxHash;
    use nftlend_workflow::{SkipReason, WorkflowError};

    #[test]
    fn test_progress_messages() {
        assert!(ProgressObserver::message(WorkflowState::AwaitingSignature).is_some());
        assert!(ProgressObserver::message(WorkflowState::Validating).is_none());
        assert!(ProgressObserver::message(WorkflowState::Done).is_none());
    }

    #[test]
    fn test_skip_is_not_an_error() {
        assert!(report_outcome(WorkflowOutcome::Skipped(SkipReason::NoAccount)).is_ok());
    }

    #[test]
    fn test_failure_carries_store_message() {
        let err = report_outcome(WorkflowOutcome::Failed(WorkflowError::reconciliation(
            StoreError::rejected(400, Some("Already grabbed".to_string())),
            TxHash::new("0xabc"),
        )))
        .unwrap_err();
        assert_eq!(err.to_string(), "Already grabbed");
    }
}
