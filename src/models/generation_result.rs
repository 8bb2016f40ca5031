//! Result models for invoice generation and finalization.
//!
//! This module contains the [`GenerationResult`] returned by the generation
//! pipeline, the skip reporting that makes per-shift failures explicit in
//! the return value rather than a side-channel log, and the
//! [`FinalizeOutcome`] that carries the non-blocking accounting-sync result
//! alongside the finalized invoice.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Invoice, InvoiceLineItem};

/// Why a shift was excluded from a generated invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SkipReason {
    /// No active rate card covers the shift's support type.
    RateNotConfigured {
        /// The support type with no configured rate.
        support_type: String,
    },
    /// The shift's recorded times are inconsistent (a data-integrity fault).
    InvalidTimeSpan {
        /// A description of the inconsistency.
        message: String,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::RateNotConfigured { support_type } => {
                write!(f, "no active rate for support type '{}'", support_type)
            }
            SkipReason::InvalidTimeSpan { message } => {
                write!(f, "invalid time span: {}", message)
            }
        }
    }
}

/// One shift the pipeline skipped, with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedShift {
    /// The shift that was skipped.
    pub shift_id: Uuid,
    /// The shift's support type, for operator context.
    pub support_type: String,
    /// Why the shift was skipped.
    pub reason: SkipReason,
}

/// The outcome of a successful invoice generation run.
///
/// Skipped shifts are part of the result contract: generation continues past
/// per-shift failures, and the caller decides how to surface them.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::models::GenerationResult;
///
/// fn describe(result: &GenerationResult) -> String {
///     format!(
///         "{}: {} line item(s), {} skipped",
///         result.invoice.invoice_number,
///         result.line_items.len(),
///         result.skipped.len()
///     )
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// The persisted draft invoice header.
    pub invoice: Invoice,
    /// The persisted line items, one per billed shift.
    pub line_items: Vec<InvoiceLineItem>,
    /// Shifts that were in range but could not be billed.
    pub skipped: Vec<SkippedShift>,
}

/// The outcome of the non-blocking accounting sync triggered by finalize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SyncOutcome {
    /// The invoice was handed to the accounting collaborator successfully.
    Synced,
    /// The accounting collaborator reported an error; the finalize stands.
    Failed {
        /// The collaborator's error description.
        reason: String,
    },
}

impl SyncOutcome {
    /// Returns true if the sync succeeded.
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced)
    }
}

/// The result of finalizing an invoice.
///
/// Finalize always succeeds or fails on its own merits; the accounting sync
/// outcome rides alongside and never converts into a finalize failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizeOutcome {
    /// The finalized (submitted) invoice.
    pub invoice: Invoice,
    /// What happened when the invoice was handed to the accounting sync.
    pub sync: SyncOutcome,
}
