//! Xero sales-invoice CSV export (accounting dialect A).
//!
//! One row per line item in Xero's sales-invoice import column order,
//! with local `DD/MM/YYYY` dates, plain 2-decimal amounts, and the
//! configured revenue account code and tax type on every row.

use chrono::NaiveDate;

use crate::config::XeroExportConfig;
use crate::error::{BillingError, BillingResult};
use crate::models::InvoiceLineItem;

use super::csv::{ExportFile, format_amount, format_quantity, write_row};
use super::{FinalizedInvoice, require_finalized};

const HEADER: [&str; 8] = [
    "ContactName",
    "InvoiceNumber",
    "InvoiceDate",
    "Description",
    "Quantity",
    "UnitAmount",
    "AccountCode",
    "TaxType",
];

/// Renders the Xero sales-invoice CSV for a batch of finalized invoices.
///
/// # Errors
///
/// Returns [`BillingError::ExportValidationFailed`] if any invoice in the
/// batch is not finalized; no file is produced.
pub fn export_xero_invoices(
    batch: &[FinalizedInvoice],
    config: &XeroExportConfig,
    generated_on: NaiveDate,
) -> BillingResult<ExportFile> {
    let errors = require_finalized(batch);
    if !errors.is_empty() {
        return Err(BillingError::ExportValidationFailed { errors });
    }

    let mut body = String::new();
    write_row(&mut body, &HEADER.map(str::to_string));

    for entry in batch {
        let invoice_date = invoice_date(entry);
        for item in &entry.line_items {
            write_row(
                &mut body,
                &[
                    entry.participant.full_name(),
                    entry.invoice.invoice_number.clone(),
                    invoice_date.format("%d/%m/%Y").to_string(),
                    line_description(item),
                    format_quantity(item.quantity),
                    format_amount(item.unit_price),
                    config.account_code.clone(),
                    config.tax_type.clone(),
                ],
            );
        }
    }

    Ok(ExportFile::csv(
        format!("xero_sales_invoices_{}.csv", generated_on.format("%Y%m%d")),
        body,
    ))
}

/// The invoice's accounting date: the finalize date, falling back to the
/// creation date for rows finalized by legacy imports.
fn invoice_date(entry: &FinalizedInvoice) -> NaiveDate {
    entry
        .invoice
        .finalized_at
        .unwrap_or(entry.invoice.created_at)
        .date_naive()
}

fn line_description(item: &InvoiceLineItem) -> String {
    format!(
        "{} on {}",
        item.support_type,
        item.service_date.format("%d/%m/%Y")
    )
}
