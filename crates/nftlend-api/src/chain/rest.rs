//! Full node REST ledger client
//!
//! Polls `GET <node>/transactions/by_hash/<hash>` until the transaction is
//! committed or the configured limit runs out.
//!
//! * `404` or `"type": "pending_transaction"` → keep waiting
//! * any other type with `"success": true` → final
//! * `"success": false` → failed, carrying `vm_status`
//!
//! The finality timeout bounds the whole wait, including a poll the node
//! never answers.

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, warn};
use url::Url;

use nftlend_error::{LedgerError, LedgerResult};
use nftlend_types::TxHash;

use super::{CommittedTransaction, LedgerClient, TransactionStatus};
use crate::config::LedgerConfig;

const PENDING_TRANSACTION_TYPE: &str = "pending_transaction";

/// Ledger client for a full node's REST API
pub struct RestLedgerClient {
    http_client: HttpClient,
    node_url: Url,
    poll_interval: Duration,
    timeout: Duration,
}

impl RestLedgerClient {
    pub fn new(config: &LedgerConfig) -> LedgerResult<Self> {
        let node_url = Url::parse(&config.node_url)
            .map_err(|e| LedgerError::Rpc(format!("invalid node URL: {}", e)))?;
        let http_client = HttpClient::builder()
            .timeout(config.finality_timeout())
            .build()
            .map_err(|e| LedgerError::Rpc(e.to_string()))?;

        Ok(Self {
            http_client,
            node_url,
            poll_interval: config.poll_interval(),
            timeout: config.finality_timeout(),
        })
    }

    fn transaction_url(&self, hash: &TxHash) -> LedgerResult<Url> {
        let mut url = self.node_url.clone();
        url.path_segments_mut()
            .map_err(|_| LedgerError::Rpc(format!("node URL cannot be a base: {}", self.node_url)))?
            .pop_if_empty()
            .extend(["transactions", "by_hash", hash.as_str()]);
        Ok(url)
    }

    fn parse_transaction(hash: &TxHash, body: &Value) -> LedgerResult<TransactionStatus> {
        let tx_type = body
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| LedgerError::Decoding("transaction without a type".to_string()))?;

        if tx_type == PENDING_TRANSACTION_TYPE {
            return Ok(TransactionStatus::Pending);
        }

        let success = body
            .get("success")
            .and_then(Value::as_bool)
            .ok_or_else(|| LedgerError::Decoding(format!("{} transaction without success flag", tx_type)))?;

        // Versions are u64 encoded as strings
        let version = match body.get("version") {
            Some(Value::String(s)) => s.parse::<u64>().ok(),
            Some(Value::Number(n)) => n.as_u64(),
            _ => None,
        };

        let vm_status = body
            .get("vm_status")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(TransactionStatus::Committed(CommittedTransaction {
            hash: hash.clone(),
            version,
            success,
            vm_status,
        }))
    }
}

#[async_trait]
impl LedgerClient for RestLedgerClient {
    async fn transaction_status(&self, hash: &TxHash) -> LedgerResult<TransactionStatus> {
        let response = self
            .http_client
            .get(self.transaction_url(hash)?)
            .send()
            .await
            .map_err(|e| LedgerError::Rpc(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(TransactionStatus::Pending),
            status if !status.is_success() => {
                return Err(LedgerError::Rpc(format!("node returned status {}", status)));
            }
            _ => {}
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LedgerError::Decoding(e.to_string()))?;

        Self::parse_transaction(hash, &body)
    }

    async fn wait_for_transaction(&self, hash: &TxHash) -> LedgerResult<CommittedTransaction> {
        let start = Instant::now();
        let deadline = start + self.timeout;
        let timed_out = || LedgerError::Timeout {
            hash: hash.to_string(),
            waited_ms: start.elapsed().as_millis() as u64,
        };

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let status = match timeout(remaining, self.transaction_status(hash)).await {
                Ok(status) => status,
                Err(_) => {
                    warn!(tx_hash = %hash, "node did not answer before the finality timeout");
                    return Err(timed_out());
                }
            };

            match status {
                Ok(TransactionStatus::Committed(tx)) if tx.success => {
                    debug!(tx_hash = %hash, version = ?tx.version, "transaction final");
                    return Ok(tx);
                }
                Ok(TransactionStatus::Committed(tx)) => {
                    return Err(LedgerError::TransactionFailed {
                        hash: hash.to_string(),
                        vm_status: tx.vm_status,
                    });
                }
                Ok(TransactionStatus::Pending) => {
                    debug!(tx_hash = %hash, "transaction pending");
                }
                Err(LedgerError::Rpc(message)) => {
                    // The node may briefly lag behind the one the wallet broadcast to
                    warn!(tx_hash = %hash, error = %message, "error checking transaction status");
                }
                Err(err) => return Err(err),
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(timed_out());
            }

            sleep(self.poll_interval.min(remaining)).await;
        }
    }
}
