//! HTTP record store client
//!
//! Routes, relative to the configured base URL:
//!
//! * `GET /lend?address=<addr>&status=<status>` → `{ data: Loan[] }`
//! * `GET /lend/previous?address=<addr>`        → `{ data: Loan[] }`
//! * `PUT /lend/<grab|withdraw>/<recordId>`     body `{ address }`

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use nftlend_error::{StoreError, StoreResult};
use nftlend_types::{AccountAddress, ActionKind, Loan, LoanStatus};

use super::{DataEnvelope, RecordStore, RecordUpdate, StoreAck, StoreEnvelope};
use crate::config::StoreConfig;

/// Record store reached over HTTP
pub struct HttpRecordStore {
    http_client: HttpClient,
    base_url: Url,
}

impl HttpRecordStore {
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| StoreError::Unreachable(format!("invalid record store URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Unreachable(format!(
                "record store URL cannot be a base: {}",
                base_url
            )));
        }
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> StoreResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Unreachable(format!("record store URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Turn a non-success status into a rejection carrying the store's message.
    async fn check_status(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<StoreEnvelope>()
            .await
            .ok()
            .and_then(|envelope| envelope.message);
        Err(StoreError::rejected(status.as_u16(), message))
    }

    async fn get_data<T: DeserializeOwned>(&self, url: Url, query: &[(&str, &str)]) -> StoreResult<T> {
        debug!(url = %url, "record store GET");
        let response = self
            .http_client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        let envelope: DataEnvelope<T> = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Decoding(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list_loans(&self, address: &AccountAddress, status: LoanStatus) -> StoreResult<Vec<Loan>> {
        let url = self.endpoint(&["lend"])?;
        self.get_data(url, &[("address", address.as_str()), ("status", status.as_str())])
            .await
    }

    async fn list_previous_loans(&self, address: &AccountAddress) -> StoreResult<Vec<Loan>> {
        let url = self.endpoint(&["lend", "previous"])?;
        self.get_data(url, &[("address", address.as_str())]).await
    }

    async fn record_action(
        &self,
        kind: ActionKind,
        record_id: &str,
        address: &AccountAddress,
    ) -> StoreResult<StoreAck> {
        let url = self.endpoint(&["lend", kind.as_str(), record_id])?;
        debug!(url = %url, "record store PUT");

        let response = self
            .http_client
            .put(url)
            .json(&RecordUpdate {
                address: address.clone(),
            })
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        let status = response.status().as_u16();
        let body = Self::check_status(response)
            .await?
            .text()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        if body.trim().is_empty() {
            return Ok(StoreAck::default());
        }

        let envelope: StoreEnvelope =
            serde_json::from_str(&body).map_err(|e| StoreError::Decoding(e.to_string()))?;

        // A 2xx carrying an explicit failure flag is still a rejection
        if envelope.success == Some(false) {
            return Err(StoreError::rejected(status, envelope.message));
        }

        Ok(StoreAck {
            message: envelope.message,
        })
    }
}
