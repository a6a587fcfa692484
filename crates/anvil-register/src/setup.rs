//! # Setup Flows
//!
//! Onboarding operations that run before a counter can bill: enterprise
//! signup, login, store registration, and product registration. Each
//! validates its inputs locally, then makes exactly one gateway call.
//! These are free functions rather than [`crate::Register`] methods
//! because they run before a session context exists.

use tracing::info;

use anvil_core::validation::{
    validate_category, validate_counter_count, validate_description, validate_enterprise_name,
    validate_password, validate_product_name,
};
use anvil_gateway::inventory::{AddProductRequest, NewProduct};
use anvil_gateway::onboarding::{LoginResponse, SignupRequest, SignupResponse};
use anvil_gateway::store::AddStoreRequest;
use anvil_gateway::GatewayClient;

use crate::error::WorkflowResult;

// =============================================================================
// Enterprise Signup and Login
// =============================================================================

/// Registers a new enterprise with one (billing, inventory) counter pair
/// per store.
pub async fn register_enterprise(
    gateway: &GatewayClient,
    enterprise_name: &str,
    password: &str,
    store_layouts: &[(u32, u32)],
) -> WorkflowResult<SignupResponse> {
    validate_enterprise_name(enterprise_name)?;
    validate_password(password)?;
    for &(billing, inventory) in store_layouts {
        validate_counter_count("billing counters", i64::from(billing))?;
        validate_counter_count("inventory counters", i64::from(inventory))?;
    }

    let request = SignupRequest {
        enterprise_name: enterprise_name.to_string(),
        password: password.to_string(),
        list_of_store_details: store_layouts.to_vec(),
    };
    let response = gateway.register_enterprise(&request).await?;

    info!(ent_id = %response.ent_id, "Enterprise registered");
    Ok(response)
}

/// Logs in and leaves the auth token on the client for later calls.
pub async fn login(
    gateway: &GatewayClient,
    ent_id: &str,
    password: &str,
) -> WorkflowResult<LoginResponse> {
    validate_password(password)?;
    Ok(gateway.login(ent_id, password).await?)
}

// =============================================================================
// Store and Product Registration
// =============================================================================

/// Adds a store with the given counter layout to the logged-in enterprise.
pub async fn add_store(
    gateway: &GatewayClient,
    billing_counters: u32,
    inventory_counters: u32,
) -> WorkflowResult<()> {
    validate_counter_count("billing counters", i64::from(billing_counters))?;
    validate_counter_count("inventory counters", i64::from(inventory_counters))?;

    let request = AddStoreRequest {
        billing_counter: billing_counters,
        inventory_counter: inventory_counters,
    };
    gateway.add_store(&request).await?;
    Ok(())
}

/// Registers one product under the enterprise catalog.
pub async fn add_product(
    gateway: &GatewayClient,
    enterprise_id: &str,
    name: &str,
    category: &str,
    description: &str,
) -> WorkflowResult<()> {
    validate_product_name(name)?;
    validate_category(category)?;
    validate_description(description)?;

    let request = AddProductRequest {
        product_details: vec![NewProduct {
            product_name: name.to_string(),
            product_category: category.to_string(),
            description: description.to_string(),
            enterprise_id: enterprise_id.to_string(),
        }],
        enterprise_id: enterprise_id.to_string(),
    };
    gateway.add_product(&request).await?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
