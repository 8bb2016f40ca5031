//! Error types for the NDIS billing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during invoice generation,
//! lifecycle transitions, and claim export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::InvoiceStatus;

/// A field-level validation error produced by an export formatter.
///
/// Claim exports validate their inputs before rendering any output; each
/// missing or malformed field is reported as one `FieldError` so callers can
/// show the operator exactly what to fix.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::error::FieldError;
///
/// let error = FieldError::new("organization", "abn", "ABN is required for claim export");
/// assert_eq!(error.to_string(), "organization.abn: ABN is required for claim export");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The record the error belongs to (e.g. "organization", "invoice INV-00042").
    pub scope: String,
    /// The field that is missing or invalid.
    pub field: String,
    /// A description of what is wrong and how to fix it.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(
        scope: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            scope: scope.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.scope, self.field, self.message)
    }
}

/// The main error type for the NDIS billing engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::error::BillingError;
/// use chrono::NaiveDate;
///
/// let error = BillingError::InvalidDateRange {
///     period_start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
///     period_end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid billing period: start 2026-02-01 is after end 2026-01-01"
/// );
/// ```
#[derive(Debug, Error)]
pub enum BillingError {
    /// The billing period start date is after its end date.
    #[error("Invalid billing period: start {period_start} is after end {period_end}")]
    InvalidDateRange {
        /// The requested period start.
        period_start: NaiveDate,
        /// The requested period end.
        period_end: NaiveDate,
    },

    /// No completed, uninvoiced shifts exist in the billing period.
    #[error(
        "No billable shifts for participant {participant_id} between {period_start} and {period_end}"
    )]
    NoBillableShifts {
        /// The participant being invoiced.
        participant_id: Uuid,
        /// The requested period start.
        period_start: NaiveDate,
        /// The requested period end.
        period_end: NaiveDate,
    },

    /// The organization has no active rate cards at all.
    #[error(
        "Organization {organization_id} has no active rate cards: configure rates before generating invoices"
    )]
    RatesNotConfigured {
        /// The organization missing rate configuration.
        organization_id: Uuid,
    },

    /// Rates exist, but none matched the support types actually billed.
    #[error(
        "No line items could be produced: all {skipped} shift(s) were skipped for missing rates or invalid times"
    )]
    NoLineItemsProducible {
        /// How many shifts were skipped.
        skipped: usize,
    },

    /// No active rate card covers the given support type.
    #[error("No active rate configured for support type '{support_type}'")]
    RateNotConfigured {
        /// The support type with no configured rate.
        support_type: String,
    },

    /// A shift's recorded times are inconsistent (e.g. end before start).
    #[error("Invalid time span on shift {shift_id}: {message}")]
    InvalidTimeSpan {
        /// The shift with inconsistent times.
        shift_id: Uuid,
        /// A description of the inconsistency.
        message: String,
    },

    /// The requested invoice does not exist.
    #[error("Invoice not found: {invoice_id}")]
    InvoiceNotFound {
        /// The invoice id that was not found.
        invoice_id: Uuid,
    },

    /// Finalize was attempted on an invoice that is already finalized.
    #[error("Invoice {invoice_id} is already finalized (status: {status})")]
    AlreadyFinalized {
        /// The invoice that was already finalized.
        invoice_id: Uuid,
        /// The invoice's current status.
        status: InvoiceStatus,
    },

    /// A draft-only operation was attempted on a non-draft invoice.
    #[error(
        "Invoice {invoice_id} is not a draft (status: {status}): only draft invoices may be edited or deleted"
    )]
    NotDraft {
        /// The invoice that is no longer a draft.
        invoice_id: Uuid,
        /// The invoice's current status.
        status: InvoiceStatus,
    },

    /// The requested lifecycle transition is not permitted.
    #[error("Invoice {invoice_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// The invoice being transitioned.
        invoice_id: Uuid,
        /// The current status.
        from: InvoiceStatus,
        /// The requested status.
        to: InvoiceStatus,
    },

    /// An export formatter rejected its input; no file was produced.
    #[error("Export validation failed with {} error(s)", .errors.len())]
    ExportValidationFailed {
        /// The field-level validation errors.
        errors: Vec<FieldError>,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A persistence collaborator failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return BillingError.
pub type BillingResult<T> = Result<T, BillingError>;
