//! Export formatters for finalized invoices.
//!
//! Three independent pure formatters share one input contract: a batch of
//! finalized invoices, each carrying its participant and line items. Each
//! formatter validates before it renders and produces a complete file or
//! no file at all. Formatting has no side effects, so independent batches
//! may be exported with unbounded parallelism.

mod claims;
mod csv;
mod myob;
mod xero;

use crate::error::FieldError;
use crate::models::{Invoice, InvoiceLineItem, ParticipantProfile};

pub use claims::export_bulk_claims;
pub use csv::{
    CSV_CONTENT_TYPE, ExportFile, UTF8_BOM, escape_field, format_amount, format_quantity,
    write_row,
};
pub use myob::export_myob_sales;
pub use xero::export_xero_invoices;

/// One finalized invoice prepared for export.
///
/// The caller assembles these from the persistence layer; the formatters
/// themselves never fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedInvoice {
    /// The invoice header.
    pub invoice: Invoice,
    /// The participant the invoice bills.
    pub participant: ParticipantProfile,
    /// The invoice's line items.
    pub line_items: Vec<InvoiceLineItem>,
}

/// Collects a validation error for every non-finalized invoice in a batch.
///
/// Draft and cancelled invoices must never leak into an export; all three
/// dialects share this gate.
fn require_finalized(batch: &[FinalizedInvoice]) -> Vec<FieldError> {
    batch
        .iter()
        .filter(|entry| !entry.invoice.status.is_finalized())
        .map(|entry| {
            FieldError::new(
                format!("invoice {}", entry.invoice.invoice_number),
                "status",
                format!(
                    "invoice must be finalized before export (status: {})",
                    entry.invoice.status
                ),
            )
        })
        .collect()
}
