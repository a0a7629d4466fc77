//! NFT lending workflow: the Action Workflow Coordinator.
//!
//! Grab and withdraw share one sequence: check preconditions, have the
//! wallet sign and broadcast, wait for finality, tell the record store. This
//! crate implements that sequence once and reports a single outcome per
//! invocation.
//!
//! ## Module Organization
//!
//! * **Coordinator**: the step sequence and progress observation (`coordinator`)
//! * **State Machine**: states, transition table, tracker (`state`)
//! * **Actions**: grab/withdraw request builders (`actions`)
//! * **Outcomes**: receipts, skip reasons, notifications (`outcome`)
//! * **Errors**: submission, finality and reconciliation failures (`error`)
//! * **Guard**: caller-side protection against double invocation (`guard`)

pub mod actions;
pub mod coordinator;
pub mod error;
pub mod guard;
pub mod outcome;
pub mod state;

pub use actions::{grab_request, withdraw_request, withdraw_variant};
pub use coordinator::{ActionCoordinator, TransitionEvent, WorkflowObserver};
pub use error::WorkflowError;
pub use guard::{InFlightActions, InFlightGuard};
pub use outcome::{ActionReceipt, Notification, NotificationLevel, SkipReason, WorkflowOutcome};
pub use state::{validate_transition, FailureKind, StateTracker, TransitionError, WorkflowState};
