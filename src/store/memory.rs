//! In-memory store implementation.
//!
//! [`MemoryStore`] implements every collaborator trait over plain
//! collections behind a mutex. It backs the integration tests and
//! benchmarks, and is suitable for embedding wherever a real database is
//! not: demos, single-process tools, test harnesses.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use uuid::Uuid;

use crate::error::{BillingError, BillingResult};
use crate::models::{
    BillingPeriod, Invoice, InvoiceLineItem, InvoiceStatus, PublicHoliday, RateCard, ShiftRecord,
};

use super::{HolidaySource, InvoiceStore, RateCardSource, ShiftSource};

#[derive(Debug, Default)]
struct Inner {
    shifts: Vec<ShiftRecord>,
    rate_cards: Vec<RateCard>,
    holidays: Vec<PublicHoliday>,
    invoices: HashMap<Uuid, Invoice>,
    line_items: HashMap<Uuid, Vec<InvoiceLineItem>>,
    sequences: HashMap<Uuid, u64>,
}

/// An in-memory implementation of all store traits.
///
/// All state lives behind one mutex, which makes invoice-number
/// allocation and the insert that follows it naturally serialized per
/// store, satisfying the concurrency preconditions the engine places on
/// its persistence collaborator.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::models::{ShiftRecord, ShiftStatus};
/// use ndis_billing_engine::store::MemoryStore;
/// use chrono::NaiveDateTime;
/// use uuid::Uuid;
///
/// let store = MemoryStore::new();
/// store.add_shift(ShiftRecord {
///     id: Uuid::new_v4(),
///     participant_id: Uuid::new_v4(),
///     support_type: "personal_care".to_string(),
///     scheduled_start: NaiveDateTime::parse_from_str("2026-01-12 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     scheduled_end: NaiveDateTime::parse_from_str("2026-01-12 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     actual: None,
///     status: ShiftStatus::Completed,
/// });
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a shift record.
    pub fn add_shift(&self, shift: ShiftRecord) {
        self.lock().shifts.push(shift);
    }

    /// Seeds a rate card.
    pub fn add_rate_card(&self, card: RateCard) {
        self.lock().rate_cards.push(card);
    }

    /// Seeds a public holiday.
    pub fn add_holiday(&self, holiday: PublicHoliday) {
        self.lock().holidays.push(holiday);
    }

    /// Returns the number of stored invoices.
    pub fn invoice_count(&self) -> usize {
        self.lock().invoices.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store lock poisoned")
    }
}

impl ShiftSource for MemoryStore {
    fn completed_shifts(
        &self,
        participant_id: Uuid,
        period: &BillingPeriod,
    ) -> BillingResult<Vec<ShiftRecord>> {
        let inner = self.lock();
        Ok(inner
            .shifts
            .iter()
            .filter(|s| {
                s.participant_id == participant_id
                    && s.is_billable()
                    && period.contains_date(s.scheduled_start.date())
            })
            .cloned()
            .collect())
    }
}

impl RateCardSource for MemoryStore {
    fn active_rate_cards(&self, organization_id: Uuid) -> BillingResult<Vec<RateCard>> {
        let inner = self.lock();
        Ok(inner
            .rate_cards
            .iter()
            .filter(|c| c.organization_id == organization_id && c.is_active)
            .cloned()
            .collect())
    }
}

impl HolidaySource for MemoryStore {
    fn holidays_in_period(
        &self,
        organization_id: Uuid,
        period: &BillingPeriod,
    ) -> BillingResult<Vec<PublicHoliday>> {
        let inner = self.lock();
        Ok(inner
            .holidays
            .iter()
            .filter(|h| h.organization_id == organization_id && period.contains_date(h.date))
            .cloned()
            .collect())
    }
}

impl InvoiceStore for MemoryStore {
    fn allocate_invoice_number(&self, organization_id: Uuid) -> BillingResult<String> {
        let mut inner = self.lock();
        let sequence = inner.sequences.entry(organization_id).or_insert(0);
        *sequence += 1;
        Ok(format!("INV-{:05}", sequence))
    }

    fn insert_invoice(
        &self,
        invoice: &Invoice,
        line_items: &[InvoiceLineItem],
    ) -> BillingResult<()> {
        let mut inner = self.lock();
        if inner.invoices.contains_key(&invoice.id) {
            return Err(BillingError::Storage {
                message: format!("invoice {} already exists", invoice.id),
            });
        }
        inner.invoices.insert(invoice.id, invoice.clone());
        inner.line_items.insert(invoice.id, line_items.to_vec());
        Ok(())
    }

    fn fetch_invoice(
        &self,
        invoice_id: Uuid,
    ) -> BillingResult<Option<(Invoice, Vec<InvoiceLineItem>)>> {
        let inner = self.lock();
        Ok(inner.invoices.get(&invoice_id).map(|invoice| {
            let items = inner
                .line_items
                .get(&invoice_id)
                .cloned()
                .unwrap_or_default();
            (invoice.clone(), items)
        }))
    }

    fn update_invoice(&self, invoice: &Invoice) -> BillingResult<()> {
        let mut inner = self.lock();
        match inner.invoices.get_mut(&invoice.id) {
            Some(stored) => {
                *stored = invoice.clone();
                Ok(())
            }
            None => Err(BillingError::InvoiceNotFound {
                invoice_id: invoice.id,
            }),
        }
    }

    fn delete_draft_invoice(&self, invoice_id: Uuid) -> BillingResult<()> {
        let mut inner = self.lock();
        let status = match inner.invoices.get(&invoice_id) {
            Some(invoice) => invoice.status,
            None => return Err(BillingError::InvoiceNotFound { invoice_id }),
        };
        // Status is re-checked under the same lock that removes the rows
        if status != InvoiceStatus::Draft {
            return Err(BillingError::NotDraft { invoice_id, status });
        }
        inner.line_items.remove(&invoice_id);
        inner.invoices.remove(&invoice_id);
        Ok(())
    }

    fn invoiced_shift_ids(&self, participant_id: Uuid) -> BillingResult<HashSet<Uuid>> {
        let inner = self.lock();
        let mut ids = HashSet::new();
        for invoice in inner.invoices.values() {
            if invoice.participant_id != participant_id
                || invoice.status == InvoiceStatus::Cancelled
            {
                continue;
            }
            if let Some(items) = inner.line_items.get(&invoice.id) {
                ids.extend(items.iter().map(|item| item.shift_id));
            }
        }
        Ok(ids)
    }
}
