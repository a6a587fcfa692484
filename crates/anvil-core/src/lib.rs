//! # anvil-core: Pure Business Logic for Anvil POS
//!
//! This crate is the **heart** of Anvil POS. It contains all billing logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Anvil POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/terminal                                │   │
//! │  │    Onboarding ──► Inventory ──► Billing Loop ──► Invoice        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    anvil-register                               │   │
//! │  │    session context, line accumulation, CSV import               │   │
//! │  └──────────┬──────────────────────────────────┬──────────────────┘   │
//! │             │                                   │                       │
//! │  ┌──────────▼──────────────────┐   ┌───────────▼──────────────────┐   │
//! │  │  ★ anvil-core (THIS CRATE) ★│   │      anvil-gateway           │   │
//! │  │                             │   │                              │   │
//! │  │  ┌─────────┐ ┌───────────┐ │   │  HTTP calls to the remote    │   │
//! │  │  │ pricing │ │transaction│ │   │  billing gateway             │   │
//! │  │  └─────────┘ └───────────┘ │   │                              │   │
//! │  │  ┌─────────┐ ┌───────────┐ │   └──────────────────────────────┘   │
//! │  │  │ invoice │ │validation │ │                                       │
//! │  │  └─────────┘ └───────────┘ │                                       │
//! │  │                             │                                       │
//! │  │  NO I/O • NO NETWORK •      │                                       │
//! │  │  PURE FUNCTIONS             │                                       │
//! │  └─────────────────────────────┘                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types shared with the workflow layers
//! - [`pricing`] - Line and running-total arithmetic (round only at render!)
//! - [`transaction`] - The bill under construction and its state machine
//! - [`invoice`] - Deterministic text projection of a finished transaction
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Round Once**: Totals accumulate unrounded; two-decimal rounding happens
//!    only when an invoice is rendered
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use anvil_core::pricing::{compute_line_total, format_amount};
//!
//! // $10.00 unit price, two units, no tax
//! let line_total = compute_line_total(10.0, 2, None);
//! assert_eq!(line_total, 20.0);
//!
//! // Two decimals with the currency prefix, applied at render time
//! assert_eq!(format_amount(line_total), "$20.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoice;
pub mod pricing;
pub mod transaction;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use anvil_core::Transaction` instead of
// `use anvil_core::transaction::Transaction`

pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{Document, Invoice};
pub use transaction::{Transaction, TransactionLine, TransactionStatus};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed on a single bill
///
/// ## Business Reason
/// Prevents runaway bills and ensures reasonable transaction sizes.
/// Can be made configurable per-enterprise in future versions.
pub const MAX_BILL_LINES: usize = 100;

/// Maximum quantity of a single line on a bill
///
/// ## Business Reason
/// Prevents accidental over-billing (e.g., typing 1000 instead of 10).
/// Configurable per-enterprise in future versions.
pub const MAX_LINE_QUANTITY: u32 = 999;
