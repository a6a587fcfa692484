//! # Transaction
//!
//! The billing transaction: an append-only list of lines plus a running
//! total, driven through a small state machine.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Transaction Lifecycle                              │
//! │                                                                         │
//! │            add_line (ok)             finish                             │
//! │   Empty ──────────────▶ Accumulating ──────▶ Finished                   │
//! │     │                      │    ▲               │                       │
//! │     │ add_line (err)       └────┘               │ add_line / finish     │
//! │     ▼                   add_line (ok)           ▼                       │
//! │   unchanged                                  TransactionFinished        │
//! │                                                                         │
//! │   A failed add_line never changes lines, total or status.               │
//! │   There is no removal: a wrong line means voiding the whole bill        │
//! │   and starting over.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::pricing;
use crate::types::Product;
use crate::validation::validate_quantity;
use crate::MAX_BILL_LINES;

// =============================================================================
// Status
// =============================================================================

/// Lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionStatus {
    /// No lines yet. Rendering is rejected.
    Empty,
    /// At least one line accepted, still open for more.
    Accumulating,
    /// Invoice generated. Terminal state, no transitions out.
    Finished,
}

// =============================================================================
// Transaction Line
// =============================================================================

/// One accepted billing line.
///
/// The line total is computed once at acceptance and stored unrounded,
/// so re-rendering a bill never recomputes prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLine {
    pub product_id: String,
    /// Unit price captured at acceptance time.
    pub unit_price: f64,
    /// Tax percentage captured at acceptance time.
    pub tax_rate: Option<f64>,
    pub quantity: u32,
    /// `unit_price * quantity * (1 + tax_rate/100)`, unrounded.
    pub line_total: f64,
}

impl TransactionLine {
    pub fn new(
        product_id: impl Into<String>,
        unit_price: f64,
        tax_rate: Option<f64>,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            unit_price,
            tax_rate,
            quantity,
            line_total: pricing::compute_line_total(unit_price, quantity, tax_rate),
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// An in-progress bill.
///
/// Lines are append-only. The running total is updated on every accepted
/// line and always equals the sum of the stored line totals.
///
/// `synced_lines` tracks how many leading lines the server already knows
/// about: zero for a fresh bill, everything for a freshly resumed one.
/// Updates to a resumed bill send only the lines after that watermark.
/// `server_bill` records whether the server owns the bill id, which
/// decides create-vs-append at submission independently of the watermark.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    bill_id: String,
    lines: Vec<TransactionLine>,
    running_total: f64,
    status: TransactionStatus,
    synced_lines: usize,
    #[serde(default)]
    server_bill: bool,
}

impl Transaction {
    /// Starts a fresh, empty transaction with a locally generated bill
    /// number.
    pub fn new() -> Self {
        Self {
            bill_id: generate_bill_number(),
            lines: Vec::new(),
            running_total: 0.0,
            status: TransactionStatus::Empty,
            synced_lines: 0,
            server_bill: false,
        }
    }

    /// Reopens a bill fetched from the server.
    ///
    /// The server-assigned identifier replaces the local numbering and
    /// every fetched line counts as already synced. The running total is
    /// recomputed from the lines so a resumed bill renders identically
    /// to one built locally.
    pub fn resume(bill_id: impl Into<String>, lines: Vec<TransactionLine>) -> Self {
        let status = if lines.is_empty() {
            TransactionStatus::Empty
        } else {
            TransactionStatus::Accumulating
        };
        let running_total = pricing::compute_running_total(&lines);
        let synced_lines = lines.len();
        Self {
            bill_id: bill_id.into(),
            lines,
            running_total,
            status,
            synced_lines,
            server_bill: true,
        }
    }

    /// Accepts one billing line for `quantity` units of `product`.
    ///
    /// ## Rules
    /// - Quantity must be between 1 and the per-line cap
    /// - Quantity must not exceed the product's reported stock
    /// - A finished transaction rejects all further lines
    /// - On any rejection the transaction is left exactly as it was
    pub fn add_line(&mut self, product: &Product, quantity: u32) -> CoreResult<&TransactionLine> {
        if self.status == TransactionStatus::Finished {
            return Err(CoreError::TransactionFinished {
                bill_id: self.bill_id.clone(),
            });
        }
        validate_quantity(quantity)?;
        if self.lines.len() >= MAX_BILL_LINES {
            return Err(CoreError::BillTooLarge {
                max: MAX_BILL_LINES,
            });
        }
        if !product.can_fill(quantity) {
            return Err(CoreError::InsufficientStock {
                product_id: product.product_id.clone(),
                available: product.available_stock,
                requested: quantity,
            });
        }

        let line = TransactionLine::new(
            product.product_id.clone(),
            product.unit_price,
            product.tax_rate,
            quantity,
        );
        self.running_total += line.line_total;
        self.lines.push(line);
        self.status = TransactionStatus::Accumulating;
        // Safe: a line was just pushed.
        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Closes the transaction after its invoice has been generated.
    ///
    /// Rejected on an empty transaction (nothing was billed) and on an
    /// already finished one (terminal state).
    pub fn finish(&mut self) -> CoreResult<()> {
        match self.status {
            TransactionStatus::Empty => Err(CoreError::EmptyTransaction),
            TransactionStatus::Finished => Err(CoreError::TransactionFinished {
                bill_id: self.bill_id.clone(),
            }),
            TransactionStatus::Accumulating => {
                self.status = TransactionStatus::Finished;
                Ok(())
            }
        }
    }

    /// Adopts the identifier the server assigned when the bill was created.
    pub fn adopt_bill_id(&mut self, bill_id: impl Into<String>) {
        self.bill_id = bill_id.into();
        self.server_bill = true;
    }

    /// Whether the server owns the bill id (assigned at creation or
    /// carried over from a resumed bill).
    pub fn is_server_bill(&self) -> bool {
        self.server_bill
    }

    /// Marks every current line as known to the server.
    pub fn mark_synced(&mut self) {
        self.synced_lines = self.lines.len();
    }

    /// Lines the server has not seen yet.
    pub fn unsynced_lines(&self) -> &[TransactionLine] {
        &self.lines[self.synced_lines..]
    }

    pub fn bill_id(&self) -> &str {
        &self.bill_id
    }

    pub fn lines(&self) -> &[TransactionLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Unrounded sum of all line totals.
    pub fn running_total(&self) -> f64 {
        self.running_total
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Bill Numbering
// =============================================================================

/// Generates a local bill number: `B-yymmdd-HHMMSS-XXXX`.
///
/// ## Example
/// ```text
/// B-260821-143059-0042
/// ```
///
/// The trailing four digits are random so two bills opened within the
/// same second still get distinct numbers. The server may assign its own
/// identifier at submission; see [`Transaction::adopt_bill_id`].
fn generate_bill_number() -> String {
    let now = Local::now();
    let entropy = (Uuid::new_v4().as_u128() % 10_000) as u16;
    format!("B-{}-{:04}", now.format("%y%m%d-%H%M%S"), entropy)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, unit_price: f64, stock: u32) -> Product {
        Product {
            product_id: id.to_string(),
            name: format!("Product {id}"),
            unit_price,
            tax_rate: None,
            available_stock: stock,
        }
    }

    #[test]
    fn test_new_transaction_is_empty() {
        let tx = Transaction::new();
        assert_eq!(tx.status(), TransactionStatus::Empty);
        assert_eq!(tx.line_count(), 0);
        assert_eq!(tx.running_total(), 0.0);
        assert!(tx.bill_id().starts_with("B-"));
    }

    #[test]
    fn test_bill_numbers_are_distinct() {
        let a = Transaction::new();
        let b = Transaction::new();
        assert_ne!(a.bill_id(), b.bill_id());
    }

    #[test]
    fn test_add_line_accumulates_running_total() {
        let mut tx = Transaction::new();

        let line = tx.add_line(&product("P1", 10.0, 25), 2).unwrap();
        assert_eq!(line.line_total, 20.0);
        assert_eq!(tx.status(), TransactionStatus::Accumulating);
        assert_eq!(tx.running_total(), 20.0);

        tx.add_line(&product("P2", 5.5, 10), 1).unwrap();
        assert_eq!(tx.line_count(), 2);
        assert_eq!(tx.running_total(), 25.5);
    }

    #[test]
    fn test_repeated_product_appends_new_line() {
        let mut tx = Transaction::new();
        tx.add_line(&product("P1", 10.0, 25), 2).unwrap();
        tx.add_line(&product("P1", 10.0, 25), 3).unwrap();
        assert_eq!(tx.line_count(), 2);
        assert_eq!(tx.running_total(), 50.0);
    }

    #[test]
    fn test_zero_quantity_rejected_without_side_effects() {
        let mut tx = Transaction::new();
        let err = tx.add_line(&product("P1", 10.0, 25), 0).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(tx.status(), TransactionStatus::Empty);
        assert_eq!(tx.line_count(), 0);
        assert_eq!(tx.running_total(), 0.0);
    }

    #[test]
    fn test_insufficient_stock_rejected_without_side_effects() {
        let mut tx = Transaction::new();
        tx.add_line(&product("P1", 10.0, 25), 2).unwrap();

        let err = tx.add_line(&product("P2", 5.5, 3), 5).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            } => {
                assert_eq!(product_id, "P2");
                assert_eq!(available, 3);
                assert_eq!(requested, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(tx.line_count(), 1);
        assert_eq!(tx.running_total(), 20.0);
        assert_eq!(tx.status(), TransactionStatus::Accumulating);
    }

    #[test]
    fn test_stock_boundary_is_inclusive() {
        let mut tx = Transaction::new();
        assert!(tx.add_line(&product("P1", 1.0, 5), 5).is_ok());
    }

    #[test]
    fn test_finished_transaction_rejects_lines() {
        let mut tx = Transaction::new();
        tx.add_line(&product("P1", 10.0, 25), 1).unwrap();
        tx.finish().unwrap();

        let err = tx.add_line(&product("P2", 5.5, 10), 1).unwrap_err();
        assert!(matches!(err, CoreError::TransactionFinished { .. }));
        assert_eq!(tx.line_count(), 1);
    }

    #[test]
    fn test_finish_requires_lines() {
        let mut tx = Transaction::new();
        assert!(matches!(
            tx.finish().unwrap_err(),
            CoreError::EmptyTransaction
        ));
        assert_eq!(tx.status(), TransactionStatus::Empty);
    }

    #[test]
    fn test_finish_is_terminal() {
        let mut tx = Transaction::new();
        tx.add_line(&product("P1", 10.0, 25), 1).unwrap();
        tx.finish().unwrap();
        assert!(matches!(
            tx.finish().unwrap_err(),
            CoreError::TransactionFinished { .. }
        ));
    }

    #[test]
    fn test_line_cap_enforced() {
        let mut tx = Transaction::new();
        let p = product("P1", 1.0, u32::MAX);
        for _ in 0..MAX_BILL_LINES {
            tx.add_line(&p, 1).unwrap();
        }
        let err = tx.add_line(&p, 1).unwrap_err();
        assert!(matches!(err, CoreError::BillTooLarge { .. }));
        assert_eq!(tx.line_count(), MAX_BILL_LINES);
    }

    #[test]
    fn test_resume_counts_fetched_lines_as_synced() {
        let fetched = vec![
            TransactionLine::new("P1", 10.0, None, 2),
            TransactionLine::new("P2", 5.5, None, 1),
        ];
        let mut tx = Transaction::resume("SRV-77", fetched);

        assert_eq!(tx.bill_id(), "SRV-77");
        assert_eq!(tx.status(), TransactionStatus::Accumulating);
        assert_eq!(tx.running_total(), 25.5);
        assert!(tx.is_server_bill());
        assert!(tx.unsynced_lines().is_empty());

        tx.add_line(&product("P3", 2.0, 9), 3).unwrap();
        assert_eq!(tx.unsynced_lines().len(), 1);
        assert_eq!(tx.unsynced_lines()[0].product_id, "P3");

        tx.mark_synced();
        assert!(tx.unsynced_lines().is_empty());
    }

    #[test]
    fn test_resume_with_no_lines_is_empty_but_server_owned() {
        let tx = Transaction::resume("SRV-78", Vec::new());
        assert_eq!(tx.status(), TransactionStatus::Empty);
        assert!(tx.is_server_bill());
    }

    #[test]
    fn test_adopt_bill_id_replaces_local_number() {
        let mut tx = Transaction::new();
        tx.add_line(&product("P1", 10.0, 25), 1).unwrap();
        assert!(!tx.is_server_bill());

        tx.adopt_bill_id("SRV-500");
        assert_eq!(tx.bill_id(), "SRV-500");
        assert!(tx.is_server_bill());
    }
}
