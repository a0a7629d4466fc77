//! nftlend CLI entry point

use anyhow::Context;
use clap::Parser;
use std::process;

use nftlend_api::ClientConfig;
use nftlend_cli::commands::{
    handle_grab_command, handle_loans_command, handle_offers_command, handle_withdraw_command,
};
use nftlend_cli::logging::{effective_level, init_logging};
use nftlend_cli::{AppContext, Cli, CliErrorHandler, CliResult, Command};

//-----------------------------------------------------------------------------
// Main Function
//-----------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let error_handler = CliErrorHandler::new(cli.error_report.clone(), cli.verbose);

    if let Err(err) = run(cli).await {
        error_handler.handle_error(&err);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = ClientConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let level = effective_level(&config.logging.level, cli.verbose);
    init_logging(Some(&level), Some(config.logging.json)).context("failed to initialise logging")?;

    let ctx = AppContext::from_config(config)?;

    match cli.command {
        Command::Loans { address } => handle_loans_command(&ctx, address).await,
        Command::Offers { address } => handle_offers_command(&ctx, address).await,
        Command::Grab { record_id } => handle_grab_command(&ctx, &record_id).await,
        Command::Withdraw { offer_id } => handle_withdraw_command(&ctx, &offer_id).await,
    }
}
