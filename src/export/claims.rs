//! NDIA bulk-claims CSV export.
//!
//! Renders finalized invoices into the claims portal's bulk upload
//! format, one row per government-claimable line item. The formatter is
//! fail-closed: if any required organization, participant, or invoice
//! field is missing it returns the full list of field errors and produces
//! no file.

use chrono::NaiveDate;

use crate::config::ClaimsExportConfig;
use crate::error::{BillingError, BillingResult, FieldError};
use crate::models::OrganizationProfile;

use super::csv::{ExportFile, format_amount, format_quantity, write_row};
use super::{FinalizedInvoice, require_finalized};

const HEADER: [&str; 10] = [
    "RegistrationNumber",
    "ProviderABN",
    "NDISNumber",
    "SupportsDeliveredFrom",
    "SupportsDeliveredTo",
    "SupportNumber",
    "ClaimReference",
    "Quantity",
    "UnitPrice",
    "GSTCode",
];

/// Renders the NDIA bulk-claims CSV for a batch of finalized invoices.
///
/// Line items without a support item number are silently excluded from the
/// row set: they are not government-claimable, and their absence is an
/// inclusion filter, not a validation error. Dates are ISO (`YYYY-MM-DD`)
/// as the portal expects, and the file is BOM-prefixed for spreadsheet
/// review before upload.
///
/// # Arguments
///
/// * `organization` - The claiming provider's registration profile
/// * `batch` - The finalized invoices to claim
/// * `config` - Claims export settings (GST code)
/// * `generated_on` - The date stamped into the filename
///
/// # Errors
///
/// Returns [`BillingError::ExportValidationFailed`] carrying one
/// [`FieldError`] per problem when the organization is missing its
/// registration number or ABN, any participant is missing an NDIS number,
/// or any invoice in the batch is not finalized. No file is produced on
/// validation failure.
pub fn export_bulk_claims(
    organization: &OrganizationProfile,
    batch: &[FinalizedInvoice],
    config: &ClaimsExportConfig,
    generated_on: NaiveDate,
) -> BillingResult<ExportFile> {
    let mut errors = Vec::new();

    let registration_number = match &organization.ndis_registration_number {
        Some(number) => number.clone(),
        None => {
            errors.push(FieldError::new(
                "organization",
                "ndis_registration_number",
                "NDIS registration number is required for claim export",
            ));
            String::new()
        }
    };
    let abn = match &organization.abn {
        Some(abn) => abn.clone(),
        None => {
            errors.push(FieldError::new(
                "organization",
                "abn",
                "ABN is required for claim export",
            ));
            String::new()
        }
    };

    errors.extend(require_finalized(batch));

    for entry in batch {
        if entry.participant.ndis_number.is_none() {
            errors.push(FieldError::new(
                format!("participant {}", entry.participant.full_name()),
                "ndis_number",
                format!(
                    "NDIS number is required to claim invoice {}",
                    entry.invoice.invoice_number
                ),
            ));
        }
    }

    if !errors.is_empty() {
        return Err(BillingError::ExportValidationFailed { errors });
    }

    let mut body = String::new();
    write_row(&mut body, &HEADER.map(str::to_string));

    for entry in batch {
        // Validated non-empty above
        let ndis_number = entry.participant.ndis_number.clone().unwrap_or_default();

        for (index, item) in entry.line_items.iter().enumerate() {
            // Not claimable without a support item number
            let Some(support_number) = &item.support_item_code else {
                continue;
            };

            write_row(
                &mut body,
                &[
                    registration_number.clone(),
                    abn.clone(),
                    ndis_number.clone(),
                    item.service_date.format("%Y-%m-%d").to_string(),
                    item.service_date.format("%Y-%m-%d").to_string(),
                    support_number.clone(),
                    format!("{}-{:02}", entry.invoice.invoice_number, index + 1),
                    format_quantity(item.quantity),
                    format_amount(item.unit_price),
                    config.gst_code.clone(),
                ],
            );
        }
    }

    Ok(ExportFile::csv(
        format!("ndia_bulk_claims_{}.csv", generated_on.format("%Y%m%d")),
        body,
    ))
}
