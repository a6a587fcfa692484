//! # Workflow Error Types
//!
//! Errors raised by the register workflow: session context problems,
//! in-flight refusals, import failures, and everything bubbled up from
//! the domain and gateway layers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Workflow Error Sources                               │
//! │                                                                         │
//! │   anvil-core ──▶ CoreError ────┐                                        │
//! │                                ├──▶ WorkflowError ──▶ terminal display  │
//! │   anvil-gateway ─▶ GatewayError┘         ▲                              │
//! │                                          │                              │
//! │   session / flight / import / sink ──────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anvil_core::CoreError;
use anvil_gateway::GatewayError;
use thiserror::Error;

/// Result type alias for register operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors surfaced by the billing session and its side workflows.
///
/// Every variant is handled locally: the operator sees a message and the
/// session stays usable. Nothing here is retried or treated as fatal.
#[derive(Debug, Error)]
pub enum WorkflowError {
    // =========================================================================
    // Session Errors
    // =========================================================================
    /// A required session identifier is absent.
    ///
    /// ## When This Occurs
    /// - No session file exists yet (nobody logged in on this machine)
    /// - The session file is missing the enterprise, store or counter id
    #[error("Session context missing: {field}. Log in and select a store first.")]
    MissingContext { field: String },

    /// Failed to read or parse the session file.
    #[error("Failed to load session: {0}")]
    SessionLoadFailed(String),

    /// Failed to write the session file.
    #[error("Failed to save session: {0}")]
    SessionSaveFailed(String),

    // =========================================================================
    // Flow Control
    // =========================================================================
    /// Another request is already in flight for this session.
    ///
    /// The register allows one outstanding gateway call at a time; a
    /// second action is refused rather than queued.
    #[error("Busy: {operation} is still in progress")]
    Busy { operation: String },

    /// A bill with accepted lines is already open; it must be finished
    /// (or abandoned with a new bill) before another can be resumed.
    #[error("Bill {bill_id} is already in progress")]
    OpenTransaction { bill_id: String },

    /// Submit was called on a resumed bill with no newly added lines.
    #[error("No new lines to submit")]
    NothingToSubmit,

    // =========================================================================
    // Import Errors
    // =========================================================================
    /// The import file could not be read or parsed at all.
    #[error("Failed to read import file: {0}")]
    ImportReadFailed(String),

    /// Row validation found failures; nothing was sent to the gateway.
    #[error("Import rejected: {failing_rows} row(s) failed validation")]
    ImportRejected { failing_rows: usize },

    /// The gateway refused a row mid-import; earlier rows were applied,
    /// this row and everything after it were not.
    #[error("Import stopped at row {row}: {source}")]
    ImportRowFailed {
        row: usize,
        #[source]
        source: GatewayError,
    },

    // =========================================================================
    // Document Errors
    // =========================================================================
    /// Writing the invoice document failed.
    #[error("Failed to save invoice document: {0}")]
    DocumentSaveFailed(String),

    // =========================================================================
    // Wrapped Layers
    // =========================================================================
    /// Domain error (validation, stock, transaction state).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Gateway error (transport, rejection, not found).
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<anvil_core::ValidationError> for WorkflowError {
    fn from(err: anvil_core::ValidationError) -> Self {
        WorkflowError::Core(CoreError::Validation(err))
    }
}

impl From<csv::Error> for WorkflowError {
    fn from(err: csv::Error) -> Self {
        WorkflowError::ImportReadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for WorkflowError {
    fn from(err: toml::de::Error) -> Self {
        WorkflowError::SessionLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for WorkflowError {
    fn from(err: toml::ser::Error) -> Self {
        WorkflowError::SessionSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl WorkflowError {
    /// Returns true if the failure is missing session context.
    pub fn is_missing_context(&self) -> bool {
        matches!(self, WorkflowError::MissingContext { .. })
    }

    /// Returns true if the operation was refused because another one is
    /// still running.
    pub fn is_busy(&self) -> bool {
        matches!(self, WorkflowError::Busy { .. })
    }

    /// Returns true if the gateway had no record for a lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WorkflowError::Gateway(g) if g.is_not_found())
    }
}
