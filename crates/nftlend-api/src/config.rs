//! Configuration for the lending client
//!
//! Loaded from a TOML file, then overridden from `NFTLEND_*` environment
//! variables. Every section has defaults except the lending contract address.

use nftlend_error::{ConfigError, ConfigResult};
use nftlend_types::{AssetInfo, AssetRegistry, TxHash};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Environment variables that override file settings
pub const ENV_API_URL: &str = "NFTLEND_API_URL";
pub const ENV_NODE_URL: &str = "NFTLEND_NODE_URL";
pub const ENV_WALLET_URL: &str = "NFTLEND_WALLET_URL";
pub const ENV_CONTRACT_ADDRESS: &str = "NFTLEND_CONTRACT_ADDRESS";
pub const ENV_NETWORK: &str = "NFTLEND_NETWORK";

/// Top-level client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Off-chain record store
    pub api: StoreConfig,

    /// Ledger node and lending contract
    pub ledger: LedgerConfig,

    /// Wallet bridge used to sign transactions
    pub wallet: WalletConfig,

    /// Log output
    pub logging: LoggingConfig,

    /// Settlement assets the application accepts
    pub assets: Vec<AssetInfo>,
}

/// Record store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL the `/lend` routes hang off
    pub base_url: String,

    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl StoreConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Ledger settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Full node REST endpoint
    pub node_url: String,

    /// Address the lending module is published at
    pub contract_address: String,

    /// Network name, used in explorer links
    pub network: String,

    /// Block explorer base URL
    pub explorer_url: String,

    /// Delay between finality polls in milliseconds
    pub poll_interval_ms: u64,

    /// Give up waiting for finality after this many milliseconds
    pub finality_timeout_ms: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            node_url: "https://fullnode.testnet.aptoslabs.com/v1".to_string(),
            contract_address: String::new(),
            network: "testnet".to_string(),
            explorer_url: "https://explorer.aptoslabs.com".to_string(),
            poll_interval_ms: 1_000,
            finality_timeout_ms: 20_000,
        }
    }
}

impl LedgerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn finality_timeout(&self) -> Duration {
        Duration::from_millis(self.finality_timeout_ms)
    }

    /// Explorer page for a transaction
    pub fn explorer_txn_url(&self, hash: &TxHash) -> String {
        format!(
            "{}/txn/{}?network={}",
            self.explorer_url.trim_end_matches('/'),
            hash,
            self.network
        )
    }
}

/// Wallet bridge settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub bridge_url: String,

    /// Signing waits on a human; keep this generous
    pub request_timeout_ms: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            bridge_url: "http://127.0.0.1:8787".to_string(),
            request_timeout_ms: 300_000,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `nftlend_workflow=debug,info`
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

//-----------------------------------------------------------------------------
// Loading
//-----------------------------------------------------------------------------

impl ClientConfig {
    /// Parse a TOML document. Missing sections take their defaults.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read the file (if any), apply process environment overrides, validate.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => {
                let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                Self::from_toml_str(&source)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Override settings from an environment lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_API_URL) {
            self.api.base_url = value;
        }
        if let Some(value) = lookup(ENV_NODE_URL) {
            self.ledger.node_url = value;
        }
        if let Some(value) = lookup(ENV_WALLET_URL) {
            self.wallet.bridge_url = value;
        }
        if let Some(value) = lookup(ENV_CONTRACT_ADDRESS) {
            self.ledger.contract_address = value;
        }
        if let Some(value) = lookup(ENV_NETWORK) {
            self.ledger.network = value;
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [
            ("api.base_url", &self.api.base_url),
            ("ledger.node_url", &self.ledger.node_url),
            ("wallet.bridge_url", &self.wallet.bridge_url),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(format!("{} must be set", name)));
            }
        }

        let contract = self.ledger.contract_address.trim();
        if contract.is_empty() {
            return Err(ConfigError::invalid("ledger.contract_address must be set"));
        }
        if !contract.starts_with("0x") {
            return Err(ConfigError::invalid(format!(
                "ledger.contract_address must start with 0x: {}",
                contract
            )));
        }

        if self.ledger.poll_interval_ms == 0 {
            return Err(ConfigError::invalid("ledger.poll_interval_ms must be positive"));
        }

        let mut seen = HashSet::new();
        for asset in &self.assets {
            if !seen.insert(asset.asset_type.as_str()) {
                return Err(ConfigError::invalid(format!(
                    "duplicate asset type {}",
                    asset.asset_type
                )));
            }
        }

        Ok(())
    }

    pub fn asset_registry(&self) -> AssetRegistry {
        AssetRegistry::from_assets(self.assets.iter().cloned())
    }
}
