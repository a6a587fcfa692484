//! Error handling for the terminal.
//!
//! Every failure shown to the operator is a [`UserError`]: a stable
//! machine-readable code plus a human-readable message. Workflow errors
//! from the register stack are folded into this shape at the command
//! boundary so the loop only ever prints one kind of error.

use serde::Serialize;

use anvil_core::CoreError;
use anvil_gateway::GatewayError;
use anvil_register::WorkflowError;

// ===== Error Codes =====

/// Stable error codes surfaced to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Requested resource doesn't exist
    NotFound,
    /// Input failed validation
    ValidationError,
    /// Not enough stock to cover the requested quantity
    InsufficientStock,
    /// The current bill has no lines
    EmptyTransaction,
    /// Operation not allowed in the current bill state
    BusinessLogic,
    /// Another counter operation is still running
    Busy,
    /// No session context is available yet
    MissingContext,
    /// Stock import could not be read or applied
    ImportError,
    /// Gateway configuration problem
    ConfigError,
    /// The billing server rejected or never received the request
    RemoteError,
    /// Session file could not be read or written
    SessionError,
    /// Invoice document could not be saved
    DocumentError,
    /// Terminal input stream problem
    InputError,
}

// ===== User Error =====

/// An error shaped for the operator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserError {
    pub code: ErrorCode,
    pub message: String,
}

impl UserError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        UserError {
            code,
            message: message.into(),
        }
    }

    /// Shorthand for operator input that doesn't parse.
    pub fn invalid(message: impl Into<String>) -> Self {
        UserError::new(ErrorCode::ValidationError, message)
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for UserError {}

// ===== Conversions =====

fn code_for(err: &WorkflowError) -> ErrorCode {
    match err {
        WorkflowError::MissingContext { .. } => ErrorCode::MissingContext,
        WorkflowError::SessionLoadFailed(_) | WorkflowError::SessionSaveFailed(_) => {
            ErrorCode::SessionError
        }
        WorkflowError::Busy { .. } => ErrorCode::Busy,
        WorkflowError::OpenTransaction { .. } | WorkflowError::NothingToSubmit => {
            ErrorCode::BusinessLogic
        }
        WorkflowError::ImportReadFailed(_)
        | WorkflowError::ImportRejected { .. }
        | WorkflowError::ImportRowFailed { .. } => ErrorCode::ImportError,
        WorkflowError::DocumentSaveFailed(_) => ErrorCode::DocumentError,
        WorkflowError::Core(core) => match core {
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::EmptyTransaction => ErrorCode::EmptyTransaction,
            CoreError::TransactionFinished { .. } | CoreError::BillTooLarge { .. } => {
                ErrorCode::BusinessLogic
            }
            CoreError::Validation(_) => ErrorCode::ValidationError,
        },
        WorkflowError::Gateway(gateway) => match gateway {
            GatewayError::NotFound { .. } => ErrorCode::NotFound,
            GatewayError::InvalidConfig(_)
            | GatewayError::InvalidUrl(_)
            | GatewayError::ConfigLoadFailed(_)
            | GatewayError::ConfigSaveFailed(_) => ErrorCode::ConfigError,
            GatewayError::ConnectionFailed(_)
            | GatewayError::Timeout(_)
            | GatewayError::RequestFailed(_)
            | GatewayError::RemoteRejected { .. }
            | GatewayError::DeserializationFailed(_) => ErrorCode::RemoteError,
        },
    }
}

impl From<WorkflowError> for UserError {
    fn from(err: WorkflowError) -> Self {
        UserError {
            code: code_for(&err),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for UserError {
    fn from(err: std::io::Error) -> Self {
        UserError::new(ErrorCode::InputError, err.to_string())
    }
}

// ===== Tests =====
