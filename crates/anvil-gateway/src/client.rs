//! # Gateway Client
//!
//! Thin wrapper around `reqwest` shared by every endpoint module.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Request Flow                                    │
//! │                                                                         │
//! │  endpoint method (billing.rs, inventory.rs, ...)                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  get_json / post_json / post_unit / put_json                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  dispatch: attach bearer token (if logged in) ──▶ send ──▶ status      │
//! │        │                                                     │          │
//! │        │  2xx: decode JSON body                              │          │
//! │        │  other: RemoteRejected { status, detail }  ◀────────┘          │
//! │        ▼                                                                │
//! │  GatewayResult<T>                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Timeouts are baked into the `reqwest::Client` at construction; individual
//! calls cannot extend them. The bearer token is a shared slot filled by
//! login and read by every later dispatch.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};

/// Maximum characters of a rejection body carried into the error detail.
const MAX_DETAIL_LEN: usize = 200;

// =============================================================================
// Gateway Client
// =============================================================================

/// Shared HTTP client for all gateway endpoints.
///
/// Cheap to share behind an `Arc`; the underlying `reqwest::Client` pools
/// connections internally.
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl GatewayClient {
    /// Builds a client from validated configuration.
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GatewayError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // =========================================================================
    // Bearer Token Slot
    // =========================================================================

    /// Stores the auth token attached to every subsequent request.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
        debug!("Gateway auth token stored");
    }

    /// Drops the stored auth token.
    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    // =========================================================================
    // JSON Helpers
    // =========================================================================

    pub(crate) async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> GatewayResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let builder = self.http.get(url).query(query);
        let response = self.dispatch(builder, "GET", path).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let builder = self.http.post(url).json(body);
        let response = self.dispatch(builder, "POST", path).await?;
        Ok(response.json().await?)
    }

    /// POST where the caller consumes no response body.
    pub(crate) async fn post_unit<B>(&self, path: &str, body: &B) -> GatewayResult<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        let builder = self.http.post(url).json(body);
        self.dispatch(builder, "POST", path).await?;
        Ok(())
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let builder = self.http.put(url).json(body);
        let response = self.dispatch(builder, "PUT", path).await?;
        Ok(response.json().await?)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn endpoint(&self, path: &str) -> GatewayResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn dispatch(
        &self,
        builder: RequestBuilder,
        method: &str,
        path: &str,
    ) -> GatewayResult<reqwest::Response> {
        let builder = match self.token.read().await.as_ref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        debug!(method = %method, path = %path, "Dispatching gateway request");
        let response = builder.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(MAX_DETAIL_LEN)
            .collect();
        warn!(status = status.as_u16(), path = %path, "Gateway rejected request");
        Err(GatewayError::RemoteRejected {
            status: status.as_u16(),
            detail,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
