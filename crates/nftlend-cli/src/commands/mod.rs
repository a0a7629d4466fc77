//! Command handlers
//!
//! * **Context**: clients built once from configuration (`AppContext`)
//! * **Listing**: `loans` and `offers` (`listing`)
//! * **Actions**: `grab` and `withdraw` (`action`)

use std::sync::Arc;

use anyhow::{Context, Result};
use nftlend_api::{
    ClientConfig, HttpRecordStore, HttpWalletBridge, LedgerClient, RecordStore, RestLedgerClient,
    WalletSession,
};
use nftlend_types::{AccountAddress, AssetRegistry};
use nftlend_workflow::ActionCoordinator;

pub mod action;
pub mod listing;

pub use action::{handle_grab_command, handle_withdraw_command, report_outcome, ProgressObserver};
pub use listing::{handle_loans_command, handle_offers_command};

/// Clients shared by every command of one run
pub struct AppContext {
    pub config: ClientConfig,
    pub store: Arc<dyn RecordStore>,
    pub ledger: Arc<dyn LedgerClient>,
    pub assets: AssetRegistry,
}

impl AppContext {
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let store = HttpRecordStore::new(&config.api).context("failed to create record store client")?;
        let ledger = RestLedgerClient::new(&config.ledger).context("failed to create ledger client")?;
        let assets = config.asset_registry();

        Ok(Self {
            config,
            store: Arc::new(store),
            ledger: Arc::new(ledger),
            assets,
        })
    }

    pub fn coordinator(&self) -> ActionCoordinator {
        ActionCoordinator::new(
            Arc::clone(&self.ledger),
            Arc::clone(&self.store),
            self.config.ledger.clone(),
        )
    }

    /// Ask the wallet bridge which account is connected.
    pub async fn connect_wallet(&self) -> Result<HttpWalletBridge> {
        HttpWalletBridge::connect(&self.config.wallet)
            .await
            .with_context(|| format!("failed to reach wallet bridge at {}", self.config.wallet.bridge_url))
    }

    /// Account to list records for: the explicit one, else the wallet's.
    pub async fn resolve_account(&self, address: Option<&str>) -> Result<Option<AccountAddress>> {
        match address {
            Some(address) => Ok(Some(
                AccountAddress::parse(address).with_context(|| format!("invalid address {}", address))?,
            )),
            None => Ok(self.connect_wallet().await?.account()),
        }
    }
}
