//! # anvil-register: Billing Workflow for Anvil POS
//!
//! This crate is the orchestration layer between the pure billing logic in
//! `anvil-core` and the HTTP client in `anvil-gateway`. It owns the session
//! context, the transaction under construction, and the invoice output.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Register Architecture                              │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Register (Main Orchestrator)                   │  │
//! │  │                                                                  │  │
//! │  │  One instance per counter. Owns the current transaction          │  │
//! │  │  and serializes remote operations via the in-flight flag.        │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ProductDirectory│  │ BillingService │  │     DocumentSink       │    │
//! │  │                │  │                │  │                        │    │
//! │  │ Product lookup │  │ Create, fetch  │  │ Invoice text files,    │    │
//! │  │ and inventory  │  │ and append to  │  │ one per bill, pages    │    │
//! │  │ listing        │  │ bills          │  │ split by form feed     │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  SUPPORTING PIECES:                                                     │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ SessionContext │  │  CSV Import    │  │        Setup           │    │
//! │  │                │  │                │  │                        │    │
//! │  │ enterprise /   │  │ Validate whole │  │ Signup, login, store   │    │
//! │  │ store /counter │  │ file, then one │  │ and product            │    │
//! │  │ + token (TOML) │  │ post per row   │  │ registration           │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`register`] - The billing loop: add lines, resume, submit, invoice
//! - [`session`] - Persistent session context (enterprise/store/counter)
//! - [`ports`] - Traits the register talks through, plus gateway adapters
//! - [`flight`] - One-operation-at-a-time guard
//! - [`documents`] - Filesystem invoice sink
//! - [`csv_import`] - Bulk stock updates from CSV
//! - [`setup`] - Onboarding flows (signup, login, stores, products)
//! - [`error`] - Workflow error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use anvil_register::{FsDocumentSink, Register, SessionContext};
//!
//! let context = SessionContext::load(None)?;
//! let gateway = Arc::new(GatewayClient::new(&config)?);
//! let sink = Arc::new(FsDocumentSink::default_sink()?);
//!
//! let register = Register::new(context, gateway.clone(), gateway, sink)?;
//! register.add_line("P-100", "2").await?;
//! let record = register.submit().await?;
//! let path = register.save_invoice().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod csv_import;
pub mod documents;
pub mod error;
pub mod flight;
pub mod ports;
pub mod register;
pub mod session;
pub mod setup;

// =============================================================================
// Re-exports
// =============================================================================

pub use csv_import::{load_import_file, parse_import, submit_import, ImportBatch, RowFailure};
pub use documents::FsDocumentSink;
pub use error::{WorkflowError, WorkflowResult};
pub use flight::InFlightFlag;
pub use ports::{BillingService, DocumentSink, ProductDirectory};
pub use register::Register;
pub use session::{CounterScope, SessionContext};
