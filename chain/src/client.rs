//! Read-only chain access.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use birthday_types::AccountAddress;

use crate::wire::{ApiErrorBody, RawEvent, ViewRequest};
use crate::{ChainConfig, ChainError};

/// Error code the fullnode uses for an account that has never been created.
pub const ACCOUNT_NOT_FOUND_CODE: &str = "account_not_found";

/// The read-only endpoints the client needs from a fullnode.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Call a view function and return its raw JSON result.
    async fn view(&self, request: &ViewRequest) -> Result<serde_json::Value, ChainError>;

    /// Read up to `limit` records of an event stream stored in `handle.field`
    /// under `owner`.
    async fn events(
        &self,
        owner: &AccountAddress,
        handle: &str,
        field: &str,
        limit: u32,
    ) -> Result<Vec<RawEvent>, ChainError>;

    /// Whether an account resource exists for `address`.
    ///
    /// `Ok(false)` only for the fullnode's explicit "not found" signal; any
    /// other failure is an error.
    async fn account_exists(&self, address: &AccountAddress) -> Result<bool, ChainError>;
}

// ── RestClient ─────────────────────────────────────────────────────────

/// HTTP client for a fullnode's REST API.
///
/// Wraps `reqwest::Client` with the fullnode base URL and provides the
/// three calls of [`ChainClient`].
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// Create a client for the given base URL (e.g. `https://fullnode.testnet.aptoslabs.com/v1`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ChainError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ChainConfig) -> Result<Self, ChainError> {
        Self::new(
            config.fullnode_url(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ChainError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|b| {
                if b.message.is_empty() {
                    status.canonical_reason().unwrap_or_default().to_string()
                } else {
                    b.message
                }
            })
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or_default().to_string());
        Err(ChainError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ChainClient for RestClient {
    async fn view(&self, request: &ViewRequest) -> Result<serde_json::Value, ChainError> {
        debug!(function = %request.function, "view call");
        let response = self
            .http
            .post(format!("{}/view", self.base_url))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn events(
        &self,
        owner: &AccountAddress,
        handle: &str,
        field: &str,
        limit: u32,
    ) -> Result<Vec<RawEvent>, ChainError> {
        debug!(%owner, handle, field, limit, "event stream read");
        let response = self
            .http
            .get(format!(
                "{}/accounts/{}/events/{}/{}",
                self.base_url, owner, handle, field
            ))
            .query(&[("limit", limit)])
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn account_exists(&self, address: &AccountAddress) -> Result<bool, ChainError> {
        debug!(%address, "account lookup");
        let response = self
            .http
            .get(format!("{}/accounts/{}", self.base_url, address))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        // The not-found signal can arrive as a 404 body or inside a 200 body.
        if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&text) {
            if body.error_code == ACCOUNT_NOT_FOUND_CODE {
                return Ok(false);
            }
        }
        if !status.is_success() {
            return Err(ChainError::Status {
                status: status.as_u16(),
                body: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        Ok(true)
    }
}
