//! Invoice and line-item models.
//!
//! This module defines the [`Invoice`] header, its owned
//! [`InvoiceLineItem`] rows, and the [`InvoiceStatus`] state machine that
//! gates mutation once an invoice is finalized.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::billing::DayType;

/// The lifecycle status of an invoice.
///
/// The legal transitions are:
///
/// ```text
/// draft ──────▶ submitted ──▶ paid
///   │               │  └────▶ overdue ──▶ paid
///   └──▶ cancelled ◀┘
/// ```
///
/// Drafts are editable and deletable. Everything after `submitted` is
/// locked; `paid` and `overdue` are driven by the payments side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Editable, deletable; not yet sent anywhere.
    Draft,
    /// Finalized and locked; awaiting payment.
    Submitted,
    /// Payment received in full.
    Paid,
    /// Past its payment terms without full payment.
    Overdue,
    /// Voided from draft or submitted; terminal.
    Cancelled,
}

impl InvoiceStatus {
    /// Returns true if the invoice has passed through finalize.
    pub fn is_finalized(self) -> bool {
        matches!(self, Self::Submitted | Self::Paid | Self::Overdue)
    }

    /// Returns true if the invoice's line items and totals are immutable.
    pub fn is_locked(self) -> bool {
        self != Self::Draft
    }

    /// Returns true if the state machine permits moving to `next`.
    ///
    /// # Example
    ///
    /// ```
    /// use ndis_billing_engine::models::InvoiceStatus;
    ///
    /// assert!(InvoiceStatus::Draft.can_transition_to(InvoiceStatus::Submitted));
    /// assert!(!InvoiceStatus::Paid.can_transition_to(InvoiceStatus::Draft));
    /// ```
    pub fn can_transition_to(self, next: InvoiceStatus) -> bool {
        use InvoiceStatus::*;
        matches!(
            (self, next),
            (Draft, Submitted)
                | (Draft, Cancelled)
                | (Submitted, Paid)
                | (Submitted, Overdue)
                | (Submitted, Cancelled)
                | (Overdue, Paid)
        )
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Submitted => "submitted",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

/// One billed line on an invoice, derived from exactly one shift.
///
/// The day-type classification and the raw scheduled/actual spans are
/// persisted at generation time so the line remains auditable even if the
/// holiday calendar or rate cards change later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    /// Unique identifier for the line item.
    pub id: Uuid,
    /// The invoice this line belongs to. Lines are never shared.
    pub invoice_id: Uuid,
    /// The shift this line was billed from.
    pub shift_id: Uuid,
    /// The support type code billed.
    pub support_type: String,
    /// The persisted day-type classification of the service date.
    pub day_type: DayType,
    /// The calendar date the service was delivered on.
    pub service_date: NaiveDate,
    /// The rostered span in minutes.
    pub scheduled_minutes: i64,
    /// The checked-in span in minutes, when a check-in was recorded.
    #[serde(default)]
    pub actual_minutes: Option<i64>,
    /// The minutes actually billed: `min(scheduled, actual)` when both exist.
    pub billable_minutes: i64,
    /// The price per hour applied.
    pub unit_price: Decimal,
    /// Billable hours as a decimal (`billable_minutes / 60`).
    pub quantity: Decimal,
    /// `round(quantity * unit_price, 2)`.
    pub line_total: Decimal,
    /// The NDIS price-guide support item number, when one is configured.
    #[serde(default)]
    pub support_item_code: Option<String>,
}

/// An invoice header owned by one participant.
///
/// Created as a draft by the generation pipeline with its line items;
/// finalize is the one-way door into the locked states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier for the invoice.
    pub id: Uuid,
    /// The issuing organization.
    pub organization_id: Uuid,
    /// The participant being invoiced. Never re-targeted after creation.
    pub participant_id: Uuid,
    /// Sequential human-readable number, unique per organization.
    pub invoice_number: String,
    /// The start of the billed period (inclusive).
    pub period_start: NaiveDate,
    /// The end of the billed period (inclusive).
    pub period_end: NaiveDate,
    /// Sum of line totals, exact.
    pub subtotal: Decimal,
    /// GST on the subtotal; zero for GST-free NDIS supports.
    pub gst: Decimal,
    /// `subtotal + gst`.
    pub total: Decimal,
    /// The lifecycle status.
    pub status: InvoiceStatus,
    /// When the invoice was finalized, once non-draft.
    #[serde(default)]
    pub finalized_at: Option<DateTime<Utc>>,
    /// Who finalized the invoice, once non-draft.
    #[serde(default)]
    pub finalized_by: Option<String>,
    /// When the invoice row was created.
    pub created_at: DateTime<Utc>,
}
