//! NFT lending API: external interfaces of the lending client.
//!
//! The action workflow talks to three collaborators it does not own: the
//! user's wallet, the ledger network and the off-chain record store. This
//! crate defines a trait for each, an HTTP implementation of each, and
//! in-memory mocks for tests.
//!
//! ## Module Organization
//!
//! * **Wallet**: session accessor and sign-and-submit (`wallet`)
//! * **Ledger**: finality wait over the node REST API (`chain`)
//! * **Record Store**: loan/offer listing and reconciliation (`store`)
//! * **Configuration**: TOML + environment configuration (`config`)
//! * **Testing Utilities**: call-counting mocks (`mock`)

//-----------------------------------------------------------------------------
// Wallet Session
//-----------------------------------------------------------------------------

pub mod wallet;

pub use wallet::{HttpWalletBridge, PendingTransaction, WalletSession};

//-----------------------------------------------------------------------------
// Ledger Integration
//-----------------------------------------------------------------------------

pub mod chain;

pub use chain::{CommittedTransaction, LedgerClient, RestLedgerClient, TransactionStatus};

//-----------------------------------------------------------------------------
// Off-chain Record Store
//-----------------------------------------------------------------------------

pub mod store;

pub use store::{HttpRecordStore, RecordStore, StoreAck};

//-----------------------------------------------------------------------------
// Configuration
//-----------------------------------------------------------------------------

pub mod config;

pub use config::{ClientConfig, LedgerConfig, LoggingConfig, StoreConfig, WalletConfig};

//-----------------------------------------------------------------------------
// Testing Utilities
//-----------------------------------------------------------------------------

pub mod mock;

pub use mock::{MockLedger, MockRecordStore, MockWallet};
