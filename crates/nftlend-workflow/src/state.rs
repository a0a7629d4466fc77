//! Workflow state machine
//!
//! One invocation walks `Idle → Validating → AwaitingSignature →
//! AwaitingFinality → Reconciling → Done`, may leave for `Failed` from any of
//! the three waiting states, and may leave for `Skipped` only from
//! `Validating`. Terminal states never move again.

use std::fmt;
use thiserror::Error;

/// Which step of the workflow failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The wallet refused or could not sign and broadcast
    Submission,
    /// The ledger reported failure or the wait ran out
    Finality,
    /// The record store could not be updated
    Reconciliation,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Submission => write!(f, "submission"),
            FailureKind::Finality => write!(f, "finality"),
            FailureKind::Reconciliation => write!(f, "reconciliation"),
        }
    }
}

/// State of a single action invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    Idle,
    Validating,
    AwaitingSignature,
    AwaitingFinality,
    Reconciling,
    Done,
    Failed(FailureKind),
    Skipped,
}

impl WorkflowState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowState::Done | WorkflowState::Failed(_) | WorkflowState::Skipped
        )
    }

    /// True while the triggering control should show as busy.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            WorkflowState::AwaitingSignature
                | WorkflowState::AwaitingFinality
                | WorkflowState::Reconciling
        )
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowState::Idle => write!(f, "idle"),
            WorkflowState::Validating => write!(f, "validating"),
            WorkflowState::AwaitingSignature => write!(f, "awaiting_signature"),
            WorkflowState::AwaitingFinality => write!(f, "awaiting_finality"),
            WorkflowState::Reconciling => write!(f, "reconciling"),
            WorkflowState::Done => write!(f, "done"),
            WorkflowState::Failed(kind) => write!(f, "failed({})", kind),
            WorkflowState::Skipped => write!(f, "skipped"),
        }
    }
}

const VALID_TRANSITIONS: &[(WorkflowState, WorkflowState)] = &[
    (WorkflowState::Idle, WorkflowState::Validating),
    (WorkflowState::Validating, WorkflowState::AwaitingSignature),
    (WorkflowState::Validating, WorkflowState::Skipped),
    (WorkflowState::AwaitingSignature, WorkflowState::AwaitingFinality),
    (
        WorkflowState::AwaitingSignature,
        WorkflowState::Failed(FailureKind::Submission),
    ),
    (WorkflowState::AwaitingFinality, WorkflowState::Reconciling),
    (
        WorkflowState::AwaitingFinality,
        WorkflowState::Failed(FailureKind::Finality),
    ),
    (WorkflowState::Reconciling, WorkflowState::Done),
    (
        WorkflowState::Reconciling,
        WorkflowState::Failed(FailureKind::Reconciliation),
    ),
];

/// Attempted move that is not in the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid workflow transition from {from} to {to}")]
pub struct TransitionError {
    pub from: WorkflowState,
    pub to: WorkflowState,
}

pub fn validate_transition(from: WorkflowState, to: WorkflowState) -> Result<(), TransitionError> {
    if VALID_TRANSITIONS.contains(&(from, to)) {
        Ok(())
    } else {
        Err(TransitionError { from, to })
    }
}

/// Current state of one invocation plus the path it took
#[derive(Debug, Clone)]
pub struct StateTracker {
    current: WorkflowState,
    history: Vec<WorkflowState>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            current: WorkflowState::Idle,
            history: vec![WorkflowState::Idle],
        }
    }

    pub fn current(&self) -> WorkflowState {
        self.current
    }

    /// Every state entered so far, starting with `Idle`
    pub fn history(&self) -> &[WorkflowState] {
        &self.history
    }

    /// Move to `next`, returning the state left behind.
    pub fn advance(&mut self, next: WorkflowState) -> Result<WorkflowState, TransitionError> {
        validate_transition(self.current, next)?;
        let previous = self.current;
        self.current = next;
        self.history.push(next);
        Ok(previous)
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [WorkflowState; 10] = [
        WorkflowState::Idle,
        WorkflowState::Validating,
        WorkflowState::AwaitingSignature,
        WorkflowState::AwaitingFinality,
        WorkflowState::Reconciling,
        WorkflowState::Done,
        WorkflowState::Failed(FailureKind::Submission),
        WorkflowState::Failed(FailureKind::Finality),
        WorkflowState::Failed(FailureKind::Reconciliation),
        WorkflowState::Skipped,
    ];

    #[test]
    fn test_valid_transitions() {
        assert!(validate_transition(WorkflowState::Idle, WorkflowState::Validating).is_ok());
        assert!(validate_transition(WorkflowState::Validating, WorkflowState::Skipped).is_ok());
        assert!(validate_transition(WorkflowState::Reconciling, WorkflowState::Done).is_ok());
        assert!(validate_transition(
            WorkflowState::AwaitingFinality,
            WorkflowState::Failed(FailureKind::Finality)
        )
        .is_ok());
    }

    #[test]
    fn test_invalid_transitions() {
        // Skipping straight to finality
        assert!(validate_transition(WorkflowState::Validating, WorkflowState::AwaitingFinality).is_err());
        // Failure kind must match the step that failed
        assert!(validate_transition(
            WorkflowState::AwaitingSignature,
            WorkflowState::Failed(FailureKind::Reconciliation)
        )
        .is_err());
        // Skipped only happens during validation
        assert!(validate_transition(WorkflowState::Reconciling, WorkflowState::Skipped).is_err());
        // No self loops
        assert!(validate_transition(WorkflowState::Idle, WorkflowState::Idle).is_err());
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for from in ALL_STATES.iter().filter(|s| s.is_terminal()) {
            for to in ALL_STATES {
                assert!(
                    validate_transition(*from, to).is_err(),
                    "{} -> {} should be rejected",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_table_size() {
        let accepted = ALL_STATES
            .iter()
            .flat_map(|from| ALL_STATES.iter().map(move |to| (*from, *to)))
            .filter(|(from, to)| validate_transition(*from, *to).is_ok())
            .count();
        assert_eq!(accepted, VALID_TRANSITIONS.len());
    }

    #[test]
    fn test_tracker_records_path() {
        let mut tracker = StateTracker::new();
        tracker.advance(WorkflowState::Validating).unwrap();
        tracker.advance(WorkflowState::AwaitingSignature).unwrap();
        let previous = tracker
            .advance(WorkflowState::Failed(FailureKind::Submission))
            .unwrap();

        assert_eq!(previous, WorkflowState::AwaitingSignature);
        assert!(tracker.current().is_terminal());
        assert_eq!(tracker.history().len(), 4);

        let err = tracker.advance(WorkflowState::Done).unwrap_err();
        assert_eq!(err.from, WorkflowState::Failed(FailureKind::Submission));
    }

    #[test]
    fn test_busy_states() {
        assert!(!WorkflowState::Validating.is_busy());
        assert!(WorkflowState::AwaitingSignature.is_busy());
        assert!(WorkflowState::Reconciling.is_busy());
        assert!(!WorkflowState::Done.is_busy());
    }
}
