//! # Enterprise Onboarding
//!
//! Signup and login against the gateway. Login stores the returned auth
//! token on the client so every later call carries it as a bearer header.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::GatewayClient;
use crate::error::GatewayResult;

const SIGNUP_PATH: &str = "/api/gateway/signup";
const LOGIN_PATH: &str = "/api/gateway/entLogin";

// =============================================================================
// Wire Types
// =============================================================================

/// Signup payload.
///
/// Each store detail pair is `(billing counters, inventory counters)` and
/// serializes as a two-element array, so the wire shape is
/// `[[2, 1], [3, 2], ...]`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub enterprise_name: String,
    pub password: String,
    pub list_of_store_details: Vec<(u32, u32)>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    /// Server-assigned enterprise identifier. Used for login and as the
    /// scope of every inventory and billing call.
    pub ent_id: String,
    #[serde(default)]
    pub enterprise_description: Option<String>,
    /// Echo of the requested store layout.
    #[serde(default)]
    pub list_of_store_details: Vec<(u32, u32)>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub ent_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

// =============================================================================
// Endpoint Methods
// =============================================================================

impl GatewayClient {
    /// Registers a new enterprise with its initial store layout.
    pub async fn register_enterprise(
        &self,
        request: &SignupRequest,
    ) -> GatewayResult<SignupResponse> {
        let response: SignupResponse = self.post_json(SIGNUP_PATH, request).await?;
        info!(
            ent_id = %response.ent_id,
            stores = response.list_of_store_details.len(),
            "Enterprise registered"
        );
        Ok(response)
    }

    /// Logs in and stores the returned token for subsequent calls.
    pub async fn login(&self, ent_id: &str, password: &str) -> GatewayResult<LoginResponse> {
        let request = LoginRequest {
            ent_id: ent_id.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post_json(LOGIN_PATH, &request).await?;
        self.set_token(response.token.clone()).await;
        info!(ent_id = %ent_id, "Logged in to gateway");
        Ok(response)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
