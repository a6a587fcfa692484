//! # Pricing Calculator
//!
//! Pure arithmetic over billing lines. No side effects.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pricing Pipeline                                 │
//! │                                                                         │
//! │   unit_price ──┐                                                        │
//! │   quantity  ───┼──▶ compute_line_total ──▶ line_total (unrounded)      │
//! │   tax_rate  ───┘                               │                        │
//! │                                                ▼                        │
//! │                         compute_running_total (sum, unrounded)          │
//! │                                                │                        │
//! │                                                ▼                        │
//! │                         format_amount (round ONCE, at render)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. All intermediate totals stay unrounded `f64`
//! 2. Rounding happens exactly once, at render time
//! 3. Tax rates are percentages (18.0 means 18%)
//!
//! Rounding each line before summing drifts from rounding the sum: two
//! lines of 1.005 round to 2.00 line-by-line but to 2.01 summed first.
//! The render path always sums first.

use crate::transaction::TransactionLine;

// =============================================================================
// Line Arithmetic
// =============================================================================

/// Computes the total for a single billing line.
///
/// Formula: `unit_price * quantity * (1 + tax_rate / 100)`.
/// A missing tax rate is treated as 0% so untaxed products cost
/// exactly `unit_price * quantity`.
///
/// The result is NOT rounded. Rounding is deferred to [`format_amount`]
/// so that running totals accumulate full precision.
///
/// ## Example
/// ```
/// use anvil_core::pricing::compute_line_total;
///
/// assert_eq!(compute_line_total(10.0, 2, None), 20.0);
/// assert_eq!(compute_line_total(10.0, 2, Some(5.0)), 21.0);
/// ```
pub fn compute_line_total(unit_price: f64, quantity: u32, tax_rate: Option<f64>) -> f64 {
    let rate = tax_rate.unwrap_or(0.0);
    unit_price * quantity as f64 * (1.0 + rate / 100.0)
}

/// Sums the stored line totals of a transaction.
///
/// Line totals are kept unrounded, so the sum carries full precision.
/// Adding a line and recomputing the sum is equivalent to computing the
/// sum over all lines at once.
pub fn compute_running_total(lines: &[TransactionLine]) -> f64 {
    lines.iter().map(|line| line.line_total).sum()
}

// =============================================================================
// Rendering Helpers
// =============================================================================

/// Rounds an amount to two decimal places, half away from zero.
///
/// ## Example
/// ```
/// use anvil_core::pricing::round_to_cents;
///
/// assert_eq!(round_to_cents(25.499999999), 25.5);
/// assert_eq!(round_to_cents(6.489), 6.49);
/// ```
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Formats an amount for display: `$` prefix, exactly two decimals.
///
/// This is the single rounding point of the pricing pipeline.
///
/// ## Example
/// ```
/// use anvil_core::pricing::format_amount;
///
/// assert_eq!(format_amount(25.5), "$25.50");
/// assert_eq!(format_amount(20.0), "$20.00");
/// ```
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", round_to_cents(amount))
}

// =============================================================================
// Unit Tests
// =============================================================================
