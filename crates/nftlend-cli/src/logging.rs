//! Log output for the `nftlend` binary
//!
//! `RUST_LOG` wins over the configured level. Logs go to stderr so command
//! output on stdout stays clean.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Install the global subscriber.
pub fn init_logging(log_level: Option<&str>, json_output: Option<bool>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.unwrap_or("info")))?;

    let use_json = json_output.unwrap_or(false);

    let subscriber = Registry::default().with(env_filter);

    if use_json {
        let json_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr);
        tracing::subscriber::set_global_default(subscriber.with(json_layer))?;
    } else {
        let fmt_layer = fmt::layer()
            .pretty()
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr);
        tracing::subscriber::set_global_default(subscriber.with(fmt_layer))?;
    }

    Ok(())
}

/// Filter directive for a run: `--verbose` turns on debug output.
pub fn effective_level(configured: &str, verbose: bool) -> String {
    if verbose {
        "debug".to_string()
    } else {
        configured.to_string()
    }
}
