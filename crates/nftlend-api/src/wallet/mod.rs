//! Wallet Session Interface
//!
//! The wallet owns the user's account and signing key. The workflow only ever
//! reads the connected account and asks the wallet to sign and broadcast one
//! transaction; it never stores either.

use async_trait::async_trait;
use nftlend_error::WalletResult;
use nftlend_types::{AccountAddress, TransactionSubmission, TxHash};
use serde::{Deserialize, Serialize};

pub mod bridge;

pub use bridge::HttpWalletBridge;

/// Transaction accepted by the network but not yet final
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: TxHash,
}

/// Session accessor handed to the workflow at invocation time
#[async_trait]
pub trait WalletSession: Send + Sync {
    /// Account currently connected, if any.
    fn account(&self) -> Option<AccountAddress>;

    /// Ask the user to approve `submission`, then broadcast it.
    ///
    /// May wait indefinitely for the user to respond in the wallet UI.
    async fn sign_and_submit(
        &self,
        submission: TransactionSubmission,
    ) -> WalletResult<PendingTransaction>;
}
