//! MYOB service-sales CSV export (accounting dialect B).
//!
//! Same row granularity as the Xero dialect with MYOB's own column order
//! and naming, the configured income account, and MYOB's GST-free tax
//! code on every row.

use chrono::NaiveDate;

use crate::config::MyobExportConfig;
use crate::error::{BillingError, BillingResult};

use super::csv::{ExportFile, format_amount, format_quantity, write_row};
use super::{FinalizedInvoice, require_finalized};

const HEADER: [&str; 9] = [
    "Co./Last Name",
    "First Name",
    "Invoice #",
    "Date",
    "Description",
    "Account #",
    "Quantity",
    "Amount",
    "Tax Code",
];

/// Renders the MYOB service-sales CSV for a batch of finalized invoices.
///
/// MYOB's Amount column carries the line total rather than the unit
/// price, and the contact is split across surname and first-name columns.
///
/// # Errors
///
/// Returns [`BillingError::ExportValidationFailed`] if any invoice in the
/// batch is not finalized; no file is produced.
pub fn export_myob_sales(
    batch: &[FinalizedInvoice],
    config: &MyobExportConfig,
    generated_on: NaiveDate,
) -> BillingResult<ExportFile> {
    let errors = require_finalized(batch);
    if !errors.is_empty() {
        return Err(BillingError::ExportValidationFailed { errors });
    }

    let mut body = String::new();
    write_row(&mut body, &HEADER.map(str::to_string));

    for entry in batch {
        for item in &entry.line_items {
            write_row(
                &mut body,
                &[
                    entry.participant.last_name.clone(),
                    entry.participant.first_name.clone(),
                    entry.invoice.invoice_number.clone(),
                    item.service_date.format("%d/%m/%Y").to_string(),
                    format!("{} ({})", item.support_type, item.day_type),
                    config.income_account.clone(),
                    format_quantity(item.quantity),
                    format_amount(item.line_total),
                    config.tax_code.clone(),
                ],
            );
        }
    }

    Ok(ExportFile::csv(
        format!("myob_service_sales_{}.csv", generated_on.format("%Y%m%d")),
        body,
    ))
}
