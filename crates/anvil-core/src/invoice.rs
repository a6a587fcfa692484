//! # Invoice Renderer
//!
//! Turns a transaction into printable text. Deterministic: the same
//! transaction always renders byte-identical output, so a bill can be
//! re-printed at any time.
//!
//! ```text
//! Billing Summary
//! Store: S-01
//! Billing ID: B-260821-143059-0042
//!
//! 1. Product: P1
//!    Quantity: 2
//!    Price (per unit): $10.00
//!    Total Price: $20.00
//!
//! Grand Total: $20.00
//! ```
//!
//! Amounts are rounded HERE and nowhere else. The grand total formats the
//! unrounded running total, so it never drifts from the sum of the lines.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::pricing::format_amount;
use crate::transaction::{Transaction, TransactionLine};

/// Rows per printed page. Long bills continue on the next page.
const ROWS_PER_PAGE: usize = 40;

// =============================================================================
// Invoice
// =============================================================================

/// A renderable snapshot of a transaction.
///
/// Building an invoice does not close the transaction; callers decide
/// when to [`finish`](Transaction::finish). Building from a transaction
/// with no lines fails with [`CoreError::EmptyTransaction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    bill_id: String,
    store_id: String,
    lines: Vec<TransactionLine>,
    grand_total: f64,
}

impl Invoice {
    /// Snapshots `transaction` for rendering.
    pub fn build(transaction: &Transaction, store_id: impl Into<String>) -> CoreResult<Self> {
        if transaction.is_empty() {
            return Err(CoreError::EmptyTransaction);
        }
        Ok(Self {
            bill_id: transaction.bill_id().to_string(),
            store_id: store_id.into(),
            lines: transaction.lines().to_vec(),
            grand_total: transaction.running_total(),
        })
    }

    pub fn bill_id(&self) -> &str {
        &self.bill_id
    }

    /// Unrounded total. Use [`Invoice::rows`] for the display form.
    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    /// Renders the invoice as text rows, one entry per accepted line, in
    /// insertion order, closed by the grand total row.
    pub fn rows(&self) -> Vec<String> {
        let mut rows = Vec::with_capacity(4 + self.lines.len() * 5 + 1);
        rows.push("Billing Summary".to_string());
        rows.push(format!("Store: {}", self.store_id));
        rows.push(format!("Billing ID: {}", self.bill_id));
        rows.push(String::new());

        for (index, line) in self.lines.iter().enumerate() {
            rows.push(format!("{}. Product: {}", index + 1, line.product_id));
            rows.push(format!("   Quantity: {}", line.quantity));
            rows.push(format!(
                "   Price (per unit): {}",
                format_amount(line.unit_price)
            ));
            rows.push(format!("   Total Price: {}", format_amount(line.line_total)));
            rows.push(String::new());
        }

        rows.push(format!("Grand Total: {}", format_amount(self.grand_total)));
        rows
    }

    /// Paginates the rendered rows into a printable document.
    pub fn into_document(self) -> Document {
        let file_stem = self.bill_id.clone();
        let rows = self.rows();
        let pages = rows
            .chunks(ROWS_PER_PAGE)
            .map(|chunk| {
                let mut page = chunk.join("\n");
                page.push('\n');
                page
            })
            .collect();
        Document { file_stem, pages }
    }
}

// =============================================================================
// Document
// =============================================================================

/// Paginated invoice text, ready for a sink to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    file_stem: String,
    pages: Vec<String>,
}

impl Document {
    /// Suggested file name (without extension), derived from the bill id.
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Full document text with form-feed page breaks.
    pub fn text(&self) -> String {
        self.pages.join("\u{000C}")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
