//! # Store Setup
//!
//! Adds a store (its billing and inventory counter layout) to the
//! enterprise the session is logged in as.

use serde::Serialize;
use tracing::info;

use crate::client::GatewayClient;
use crate::error::GatewayResult;

const ADD_STORE_PATH: &str = "/api/store/addstore";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStoreRequest {
    pub billing_counter: u32,
    pub inventory_counter: u32,
}

impl GatewayClient {
    /// Registers one more store. The gateway assigns the identifiers; the
    /// success body carries nothing the client consumes.
    pub async fn add_store(&self, request: &AddStoreRequest) -> GatewayResult<()> {
        self.post_unit(ADD_STORE_PATH, request).await?;
        info!(
            billing_counters = request.billing_counter,
            inventory_counters = request.inventory_counter,
            "Store added"
        );
        Ok(())
    }
}
