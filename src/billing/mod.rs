//! Billing logic for the NDIS billing engine.
//!
//! This module contains the calculators and orchestration for turning
//! completed shifts into invoices: day-type classification, billable
//! duration resolution, rate lookup, line-item and totals calculation,
//! the invoice generation pipeline, and the lifecycle guard that locks
//! finalized invoices.

mod day_type;
mod duration;
mod generation;
mod lifecycle;
mod rate;
mod totals;

pub use day_type::{DayType, classify_day};
pub use duration::{BillableDuration, resolve_billable_duration};
pub use generation::{GenerationRequest, InvoiceGenerator};
pub use lifecycle::{delete_invoice, finalize_invoice, transition_status};
pub use rate::{ResolvedRate, resolve_rate};
pub use totals::{
    GstTreatment, InvoiceTotals, billable_quantity, calculate_invoice_totals, line_total,
    round_currency,
};
