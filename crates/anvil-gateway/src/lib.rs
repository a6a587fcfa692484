//! # Anvil Gateway Client
//!
//! Typed HTTP client for the Anvil billing/inventory gateway.
//!
//! ## Module Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        anvil-gateway modules                            │
//! │                                                                         │
//! │  config.rs      GatewayConfig: TOML file + env overrides + defaults    │
//! │  error.rs       GatewayError / GatewayResult                           │
//! │  client.rs      GatewayClient: reqwest wrapper, bearer slot, JSON I/O  │
//! │  onboarding.rs  signup / login                                         │
//! │  store.rs       add store (counter layout)                             │
//! │  inventory.rs   add product / fetch inventory / lookup / stock update  │
//! │  billing.rs     create / fetch / update bills                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every endpoint method validates nothing beyond the wire shape: input
//! validation and workflow rules belong to the caller. Timeouts come from
//! [`GatewayConfig`] and are fixed at client construction.

pub mod billing;
pub mod client;
pub mod config;
pub mod error;
pub mod inventory;
pub mod onboarding;
pub mod store;

pub use client::GatewayClient;
pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
