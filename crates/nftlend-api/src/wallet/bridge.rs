//! HTTP wallet bridge
//!
//! Talks to an external signer process that holds the user's key and shows
//! the approval prompt:
//!
//! * `GET  <bridge>/account`          → `{ "address": "0x..." | null }`
//! * `POST <bridge>/sign_and_submit`  → `{ "hash": "0x..." }`
//!
//! A non-success status on submission means the user or the wallet refused.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use nftlend_error::{WalletError, WalletResult};
use nftlend_types::{AccountAddress, TransactionSubmission, TxHash};

use super::{PendingTransaction, WalletSession};
use crate::config::WalletConfig;

#[derive(Debug, Deserialize)]
struct AccountResponse {
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    hash: String,
}

#[derive(Debug, Default, Deserialize)]
struct BridgeErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Wallet session backed by a local signer over HTTP
pub struct HttpWalletBridge {
    http_client: HttpClient,
    base_url: Url,
    account: Option<AccountAddress>,
}

impl HttpWalletBridge {
    /// Connect to the bridge and read the connected account once.
    pub async fn connect(config: &WalletConfig) -> WalletResult<Self> {
        let mut bridge = Self::disconnected(config)?;
        bridge.account = bridge.fetch_account().await?;
        match &bridge.account {
            Some(account) => info!(account = %account, "wallet connected"),
            None => info!("wallet bridge reachable but no account connected"),
        }
        Ok(bridge)
    }

    /// Bridge handle with no account read yet.
    pub fn disconnected(config: &WalletConfig) -> WalletResult<Self> {
        let base_url = Url::parse(&config.bridge_url)
            .map_err(|e| WalletError::Transport(format!("invalid bridge URL: {}", e)))?;
        let http_client = HttpClient::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| WalletError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
            account: None,
        })
    }

    fn endpoint(&self, name: &str) -> WalletResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| WalletError::Transport(format!("bridge URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }

    async fn fetch_account(&self) -> WalletResult<Option<AccountAddress>> {
        let response = self
            .http_client
            .get(self.endpoint("account")?)
            .send()
            .await
            .map_err(|e| WalletError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WalletError::Transport(format!(
                "account lookup failed with status {}",
                response.status()
            )));
        }

        let body: AccountResponse = response
            .json()
            .await
            .map_err(|e| WalletError::InvalidResponse(e.to_string()))?;

        body.address
            .filter(|address| !address.trim().is_empty())
            .map(|address| {
                AccountAddress::parse(&address)
                    .map_err(|e| WalletError::InvalidResponse(e.to_string()))
            })
            .transpose()
    }
}

#[async_trait]
impl WalletSession for HttpWalletBridge {
    fn account(&self) -> Option<AccountAddress> {
        self.account.clone()
    }

    async fn sign_and_submit(
        &self,
        submission: TransactionSubmission,
    ) -> WalletResult<PendingTransaction> {
        debug!(function = %submission.data.function, "requesting wallet signature");

        let response = self
            .http_client
            .post(self.endpoint("sign_and_submit")?)
            .json(&submission)
            .send()
            .await
            .map_err(|e| WalletError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: BridgeErrorBody = response.json().await.unwrap_or_default();
            return Err(WalletError::Rejected(
                body.message
                    .unwrap_or_else(|| format!("wallet returned status {}", status)),
            ));
        }

        let body: SubmitResponse = response
            .json()
            .await
            .map_err(|e| WalletError::InvalidResponse(e.to_string()))?;

        Ok(PendingTransaction {
            hash: TxHash::new(body.hash),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nftlend_types::SubmissionPayload;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> WalletConfig {
        WalletConfig {
            bridge_url: server.uri(),
            request_timeout_ms: 5_000,
        }
    }

    fn submission() -> TransactionSubmission {
        TransactionSubmission {
            sender: AccountAddress::parse("0xa11ce").unwrap(),
            data: SubmissionPayload {
                function: "0xcafe::nft_lending::grab".to_string(),
                type_arguments: vec![],
                function_arguments: vec!["0xb0440".to_string()],
            },
        }
    }

    #[tokio::test]
    async fn test_connect_reads_account() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/account"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "address": "0xA11CE" })))
            .mount(&server)
            .await;

        let bridge = HttpWalletBridge::connect(&config_for(&server)).await.unwrap();
        assert_eq!(bridge.account().unwrap().as_str(), "0xa11ce");
    }

    #[tokio::test]
    async fn test_connect_without_account() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/account"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "address": null })))
            .mount(&server)
            .await;

        let bridge = HttpWalletBridge::connect(&config_for(&server)).await.unwrap();
        assert!(bridge.account().is_none());
    }

    #[tokio::test]
    async fn test_sign_and_submit_posts_wire_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sign_and_submit"))
            .and(body_json(json!({
                "sender": "0xa11ce",
                "data": {
                    "function": "0xcafe::nft_lending::grab",
                    "typeArguments": [],
                    "functionArguments": ["0xb0440"]
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hash": "0x5eed" })))
            .expect(1)
            .mount(&server)
            .await;

        let bridge = HttpWalletBridge::disconnected(&config_for(&server)).unwrap();
        let pending = bridge.sign_and_submit(submission()).await.unwrap();
        assert_eq!(pending.hash.as_str(), "0x5eed");
    }

    #[tokio::test]
    async fn test_user_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sign_and_submit"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({ "message": "User rejected the request" })),
            )
            .mount(&server)
            .await;

        let bridge = HttpWalletBridge::disconnected(&config_for(&server)).unwrap();
        let err = bridge.sign_and_submit(submission()).await.unwrap_err();
        assert_eq!(err, WalletError::Rejected("User rejected the request".to_string()));
    }
}
