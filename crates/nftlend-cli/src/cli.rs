//! Command Definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// NFT lending command-line client
///
/// Lists loans and offers from the record store and runs grab and withdraw
/// actions through the wallet bridge.
#[derive(Debug, Parser)]
#[command(name = "nftlend", about = "NFT lending command-line client")]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "NFTLEND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging and full error chains
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write a JSON error report to this file when a command fails
    #[arg(long, global = true, value_name = "PATH")]
    pub error_report: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show active and previous loans
    Loans {
        /// Account to list for (defaults to the connected wallet account)
        #[arg(short, long)]
        address: Option<String>,
    },

    /// Show open offers
    Offers {
        /// Account to list for (defaults to the connected wallet account)
        #[arg(short, long)]
        address: Option<String>,
    },

    /// Claim the collateral of a defaulted loan
    Grab {
        /// Loan record identifier
        record_id: String,
    },

    /// Close an open offer
    Withdraw {
        /// Offer record identifier
        offer_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grab() {
        let cli = Cli::try_parse_from(["nftlend", "--verbose", "grab", "66a1f0c2"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Grab { ref record_id } if record_id == "66a1f0c2"));
    }

    #[test]
    fn test_parse_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["nftlend", "loans", "-c", "lend.toml", "-a", "0xa11ce"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("lend.toml")));
        assert!(matches!(cli.command, Command::Loans { address: Some(_) }));
    }

    #[test]
    fn test_parse_error_report() {
        let cli = Cli::try_parse_from(["nftlend", "withdraw", "7", "--error-report", "err.json"]).unwrap();
        assert_eq!(cli.error_report, Some(PathBuf::from("err.json")));

        let cli = Cli::try_parse_from(["nftlend", "offers"]).unwrap();
        assert!(cli.error_report.is_none());
    }

    #[test]
    fn test_withdraw_requires_id() {
        assert!(Cli::try_parse_from(["nftlend", "withdraw"]).is_err());
    }
}
