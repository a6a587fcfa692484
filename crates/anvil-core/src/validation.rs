//! # Input Validation
//!
//! Validation helpers for operator input. Each helper checks one field
//! and returns a [`ValidationError`] describing the first violation.
//!
//! ## Design Principles
//! 1. Validate BEFORE any remote call (fail fast, no wasted round trips)
//! 2. Field names in errors match what the operator typed into
//! 3. Character rules mirror the gateway's own checks so a value that
//!    passes here is never bounced by the server for format reasons

use crate::error::ValidationError;
use crate::MAX_LINE_QUANTITY;

const MAX_NAME_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 250;
const MIN_PASSWORD_LEN: usize = 8;

// =============================================================================
// Identifier Checks
// =============================================================================

/// Validates a product identifier: required, no surrounding whitespace issues.
pub fn validate_product_id(product_id: &str) -> Result<(), ValidationError> {
    if product_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }
    if product_id.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "product id".to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validates an enterprise name: alphabetic characters only, no spaces.
///
/// The gateway rejects anything else at signup, so we catch it locally.
pub fn validate_enterprise_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "enterprise name".to_string(),
        });
    }
    if !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "enterprise name".to_string(),
            reason: "only letters allowed, no spaces or digits".to_string(),
        });
    }
    Ok(())
}

/// Validates a login/signup password.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

// =============================================================================
// Text Checks
// =============================================================================

/// Validates a product name: letters and spaces only.
pub fn validate_product_name(name: &str) -> Result<(), ValidationError> {
    validate_letters_and_spaces("product name", name)
}

/// Validates a product category: letters and spaces only.
pub fn validate_category(category: &str) -> Result<(), ValidationError> {
    validate_letters_and_spaces("category", category)
}

/// Validates a free-text description: letters, digits and spaces.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }
    if !description
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "description".to_string(),
            reason: "only letters, digits and spaces allowed".to_string(),
        });
    }
    Ok(())
}

fn validate_letters_and_spaces(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if value.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }
    if !value.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "only letters and spaces allowed".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Checks
// =============================================================================

/// Validates an already-parsed quantity: at least 1, at most the line cap.
pub fn validate_quantity(quantity: u32) -> Result<(), ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY as i64,
        });
    }
    Ok(())
}

/// Parses operator-typed text into a quantity.
///
/// Rejects non-integers ("2.5", "abc"), zero and negatives. This is the
/// single place quantity text becomes a number, so the terminal and the
/// bulk importer reject the same inputs.
pub fn parse_quantity(raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "quantity".to_string(),
        });
    }
    if trimmed.starts_with('-') {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    let quantity: u32 = trimmed.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "must be a whole number".to_string(),
    })?;
    validate_quantity(quantity)?;
    Ok(quantity)
}

/// Validates a store counter count: strictly positive.
pub fn validate_counter_count(field: &str, count: i64) -> Result<(), ValidationError> {
    if count <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
