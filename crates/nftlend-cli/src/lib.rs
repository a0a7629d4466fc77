//! NFT lending CLI library
//!
//! Backs the `nftlend` binary. Split out of `main.rs` so the commands can be
//! driven from integration tests.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

pub use cli::{Cli, Command};
pub use commands::AppContext;
pub use error::{CliErrorHandler, CliResult};
