//! CLI Error Handling
//!
//! Prints errors for the terminal, optionally with their cause chain, and
//! builds the JSON form used when output goes to a file.

use std::path::PathBuf;

use anyhow::Result;
use chrono::prelude::*;
use colored::Colorize;
use nftlend_error::{ErrorMessage, LendingError};
use nftlend_workflow::WorkflowError;
use serde_json::{json, Value};
use tracing::debug;

/// Shared error handler for command line operations
#[derive(Clone)]
pub struct CliErrorHandler {
    pub output_path: Option<PathBuf>,
    pub verbose: bool,
}

impl CliErrorHandler {
    pub fn new(output_path: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            output_path,
            verbose,
        }
    }

    pub fn handle_error(&self, error: &anyhow::Error) -> Value {
        let error_message = error.to_string();

        eprintln!("{} {}", "Error:".red().bold(), error_message);
        if self.verbose {
            for cause in error.chain().skip(1) {
                eprintln!("Caused by: {}", cause);
            }
        }

        let error_obj = Self::error_json(error);
        if let Some(path) = &self.output_path {
            if let Err(e) = std::fs::write(path, error_obj.to_string()) {
                eprintln!("Could not write error report to {}: {}", path.display(), e);
            }
        }

        error_obj
    }

    /// JSON report of an error, with the lending error code when one is in the chain.
    pub fn error_json(error: &anyhow::Error) -> Value {
        let mut error_obj = json!({
            "error": error.to_string(),
            "timestamp": Utc::now().timestamp_millis(),
            "timestamp_human": Local::now().to_rfc3339(),
        });

        let lending = error
            .chain()
            .find_map(|cause| cause.downcast_ref::<WorkflowError>())
            .map(ErrorMessage::from_error);
        if let Some(message) = lending {
            error_obj["code"] = json!(message.code);
            error_obj["domain"] = json!(message.domain);
        }

        error_obj
    }
}

/// Wrap a workflow failure so the user sees its one-line message and the
/// verbose chain shows the underlying error. The error code stays in the log
/// and the JSON report.
pub fn workflow_failure(error: WorkflowError) -> anyhow::Error {
    let message = error.user_message();
    debug!(code = %error.code(), kind = ?error.kind(), error = %error, "action failed");
    anyhow::Error::new(error).context(message)
}

/// CLI result type alias
pub type CliResult<T> = Result<T>;
