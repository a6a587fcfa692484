//! # Shared Domain Types
//!
//! Types shared between the billing workflow and its callers. Wire DTOs
//! (request/response bodies) live in anvil-gateway; these are the domain
//! views the billing logic operates on.

use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A product as seen by the billing workflow.
///
/// Produced by a directory lookup (remote inventory or a cached snapshot).
/// `available_stock` is the stock level reported at lookup time; the
/// accumulator checks each requested quantity against it before accepting
/// a line.
///
/// ## Example
/// ```
/// use anvil_core::types::Product;
///
/// let product = Product {
///     product_id: "P-100".to_string(),
///     name: "Green Tea".to_string(),
///     unit_price: 10.0,
///     tax_rate: None,
///     available_stock: 25,
/// };
/// assert!(product.can_fill(25));
/// assert!(!product.can_fill(26));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub name: String,
    /// Selling price per unit, before tax.
    pub unit_price: f64,
    /// Tax percentage (18.0 means 18%). `None` means untaxed.
    pub tax_rate: Option<f64>,
    /// Units in stock at lookup time.
    pub available_stock: u32,
}

impl Product {
    /// Whether the reported stock covers the requested quantity.
    pub fn can_fill(&self, quantity: u32) -> bool {
        quantity <= self.available_stock
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            product_id: "P-100".to_string(),
            name: "Green Tea".to_string(),
            unit_price: 10.0,
            tax_rate: Some(5.0),
            available_stock: 3,
        }
    }

    #[test]
    fn test_can_fill_boundary() {
        let product = sample();
        assert!(product.can_fill(1));
        assert!(product.can_fill(3));
        assert!(!product.can_fill(4));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("productId").is_some());
        assert!(json.get("unitPrice").is_some());
        assert!(json.get("availableStock").is_some());
    }
}
