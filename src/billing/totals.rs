//! Line-item and invoice totals calculation.
//!
//! This module converts billable minutes and a unit price into a line
//! total, and aggregates line totals into the invoice's subtotal, GST, and
//! grand total. Currency rounding happens exactly once per line and once
//! for the subtotal-derived GST; already-rounded figures are summed
//! exactly, never re-rounded.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// How GST applies to an invoice's subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GstTreatment {
    /// NDIS-funded supports: GST is always zero.
    GstFree,
    /// Mixed billing: GST is charged at the given rate on the subtotal.
    Taxable {
        /// The GST rate as a fraction (0.10 for 10%).
        rate: Decimal,
    },
}

/// The aggregated money fields of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of line totals, exact.
    pub subtotal: Decimal,
    /// GST on the subtotal, rounded to currency precision.
    pub gst: Decimal,
    /// `subtotal + gst`.
    pub total: Decimal,
}

/// Rounds an amount to currency precision (2 decimal places, half-up).
///
/// # Example
///
/// ```
/// use ndis_billing_engine::billing::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("180.0525").unwrap();
/// assert_eq!(round_currency(amount), Decimal::from_str("180.05").unwrap());
///
/// let amount = Decimal::from_str("180.055").unwrap();
/// assert_eq!(round_currency(amount), Decimal::from_str("180.06").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts billable minutes into decimal hours.
///
/// The quantity is left unrounded (165 minutes is exactly 2.75 hours);
/// rounding belongs to the line total, not the quantity.
pub fn billable_quantity(billable_minutes: i64) -> Decimal {
    Decimal::new(billable_minutes, 0) / Decimal::new(60, 0)
}

/// Computes a line total from a quantity and a unit price.
///
/// This is the one place a line's amount is rounded.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::billing::{billable_quantity, line_total};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let quantity = billable_quantity(165); // 2.75 hours
/// let total = line_total(quantity, Decimal::from_str("65.47").unwrap());
/// assert_eq!(total, Decimal::from_str("180.04").unwrap()); // 180.0425 rounded
/// ```
pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Decimal {
    round_currency(quantity * unit_price)
}

/// Aggregates rounded line totals into invoice totals.
///
/// The subtotal is the exact sum of the already-rounded line totals. GST is
/// computed on the subtotal and rounded once; under
/// [`GstTreatment::GstFree`] it is exactly zero. The grand total is the
/// plain sum of the two, with no further rounding.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::billing::{GstTreatment, calculate_invoice_totals};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let lines = vec![
///     Decimal::from_str("180.04").unwrap(),
///     Decimal::from_str("94.96").unwrap(),
/// ];
/// let totals = calculate_invoice_totals(&lines, GstTreatment::GstFree);
/// assert_eq!(totals.subtotal, Decimal::from_str("275.00").unwrap());
/// assert_eq!(totals.gst, Decimal::ZERO);
/// assert_eq!(totals.total, Decimal::from_str("275.00").unwrap());
/// ```
pub fn calculate_invoice_totals(line_totals: &[Decimal], gst: GstTreatment) -> InvoiceTotals {
    let subtotal: Decimal = line_totals.iter().copied().sum();

    let gst = match gst {
        GstTreatment::GstFree => Decimal::ZERO,
        GstTreatment::Taxable { rate } => round_currency(subtotal * rate),
    };

    InvoiceTotals {
        subtotal,
        gst,
        total: subtotal + gst,
    }
}
