//! # Error Types
//!
//! Domain-specific error types for anvil-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  anvil-core errors (this file)                                         │
//! │  ├── CoreError        - Billing domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  anvil-gateway errors (separate crate)                                 │
//! │  └── GatewayError     - Remote call failures (not found, transport)    │
//! │                                                                         │
//! │  anvil-register errors (separate crate)                                │
//! │  └── WorkflowError    - Session/orchestration failures                 │
//! │                                                                         │
//! │  Terminal errors (in app)                                              │
//! │  └── UserError        - What the operator sees (coded message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → WorkflowError → UserError         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product ID, stock counts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core billing errors.
///
/// These errors represent business rule violations inside the billing
/// workflow. They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested quantity exceeds the reported available stock.
    ///
    /// ## When This Occurs
    /// - The product lookup reported less stock than the operator requested
    ///
    /// ## User Workflow
    /// ```text
    /// Add line (qty: 5)
    ///      │
    ///      ▼
    /// Lookup reports: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: "P1", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Operator sees: "Only 3 units of P1 available"
    /// ```
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: u32,
        requested: u32,
    },

    /// Render was attempted on a transaction with no lines.
    #[error("Transaction has no lines to render")]
    EmptyTransaction,

    /// The transaction is finished; no further lines may be added.
    ///
    /// ## When This Occurs
    /// - Trying to add lines after submission or render-and-save
    /// - A fresh transaction must be created for the next bill
    #[error("Bill {bill_id} is finished, cannot add lines")]
    TransactionFinished { bill_id: String },

    /// Bill has exceeded the maximum allowed line count.
    #[error("Bill cannot have more than {max} lines")]
    BillTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Used for early validation before any remote call is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-integer quantity, wrong file extension).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: "P-100".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for P-100: available 3, requested 5"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product id".to_string(),
        };
        assert_eq!(err.to_string(), "product id is required");

        let err = ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "must be a whole number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "quantity has invalid format: must be a whole number"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "product id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
