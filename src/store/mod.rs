//! Collaborator interfaces for the billing engine.
//!
//! The generation pipeline and lifecycle operations take their data-fetch
//! and persistence collaborators through these traits, so production
//! adapters (a SQL database, an accounting API) and the in-memory
//! [`MemoryStore`] are interchangeable. The engine is request-scoped and
//! stateless between invocations; every call reads its inputs fresh
//! through these interfaces.

mod memory;

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::BillingResult;
use crate::models::{
    BillingPeriod, Invoice, InvoiceLineItem, PublicHoliday, RateCard, ShiftRecord,
};

pub use memory::MemoryStore;

/// Read access to shift records.
pub trait ShiftSource {
    /// Returns the participant's completed shifts whose scheduled start
    /// falls within the billing period (inclusive).
    fn completed_shifts(
        &self,
        participant_id: Uuid,
        period: &BillingPeriod,
    ) -> BillingResult<Vec<ShiftRecord>>;
}

/// Read access to rate cards.
pub trait RateCardSource {
    /// Returns the organization's active rate cards.
    fn active_rate_cards(&self, organization_id: Uuid) -> BillingResult<Vec<RateCard>>;
}

/// Read access to gazetted public holidays.
pub trait HolidaySource {
    /// Returns the organization's public holidays falling within the period.
    fn holidays_in_period(
        &self,
        organization_id: Uuid,
        period: &BillingPeriod,
    ) -> BillingResult<Vec<PublicHoliday>>;
}

/// Persistence for invoices and their line items.
///
/// Implementations must serialize invoice-number allocation per
/// organization and persist a header with its line items as one logical
/// unit; the pipeline allocates the number as its last step, immediately
/// before the insert, so aborted generations never consume one.
pub trait InvoiceStore {
    /// Allocates the next sequential invoice number for the organization.
    ///
    /// Must be atomic and monotonic per organization.
    fn allocate_invoice_number(&self, organization_id: Uuid) -> BillingResult<String>;

    /// Persists an invoice header together with its line items.
    fn insert_invoice(
        &self,
        invoice: &Invoice,
        line_items: &[InvoiceLineItem],
    ) -> BillingResult<()>;

    /// Fetches an invoice and its line items, or `None` if it does not exist.
    fn fetch_invoice(
        &self,
        invoice_id: Uuid,
    ) -> BillingResult<Option<(Invoice, Vec<InvoiceLineItem>)>>;

    /// Replaces the stored header for an existing invoice.
    fn update_invoice(&self, invoice: &Invoice) -> BillingResult<()>;

    /// Deletes a draft invoice, cascading its line items first.
    ///
    /// Implementations must re-check the stored status atomically and
    /// reject the delete with [`crate::error::BillingError::NotDraft`] if
    /// the invoice is no longer a draft, rather than silently removing
    /// nothing.
    fn delete_draft_invoice(&self, invoice_id: Uuid) -> BillingResult<()>;

    /// Returns the ids of shifts already billed on any non-cancelled
    /// invoice for the participant. The pipeline excludes these so a shift
    /// is never billed twice.
    fn invoiced_shift_ids(&self, participant_id: Uuid) -> BillingResult<HashSet<Uuid>>;
}

/// The external accounting-package sync.
///
/// Triggered on finalize. The hand-off is non-blocking by contract: an
/// error is reported back as a reason string and never fails the finalize
/// that triggered it.
pub trait AccountingSync {
    /// Pushes a finalized invoice to the accounting system.
    fn push_invoice(&self, invoice: &Invoice, line_items: &[InvoiceLineItem])
    -> Result<(), String>;
}
