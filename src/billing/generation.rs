//! The invoice generation pipeline.
//!
//! This module orchestrates the calculators over every completed shift for
//! a participant in a billing period: resolve the billable duration,
//! classify the service day, resolve the rate, build the line items, and
//! persist the draft invoice as one unit.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    billable_quantity, calculate_invoice_totals, classify_day, line_total,
    resolve_billable_duration, resolve_rate,
};
use crate::config::BillingConfig;
use crate::error::{BillingError, BillingResult};
use crate::models::{
    BillingPeriod, GenerationResult, HolidayCalendar, Invoice, InvoiceLineItem, InvoiceStatus,
    SkipReason, SkippedShift,
};
use crate::store::{HolidaySource, InvoiceStore, RateCardSource, ShiftSource};

/// The inputs to one invoice generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    /// The issuing organization.
    pub organization_id: Uuid,
    /// The participant to invoice.
    pub participant_id: Uuid,
    /// The period to bill, inclusive on both ends.
    pub period: BillingPeriod,
}

/// Generates draft invoices from completed shifts.
///
/// The generator borrows its collaborators, so one set of adapters can
/// serve any number of request-scoped runs. Generation is a single pass
/// with no retries mid-flight; precondition failures abort before anything
/// is written, and the invoice number is allocated only once line items
/// are known, immediately before the insert.
///
/// # Example
///
/// ```no_run
/// use ndis_billing_engine::billing::{GenerationRequest, InvoiceGenerator};
/// use ndis_billing_engine::config::BillingConfig;
/// use ndis_billing_engine::models::BillingPeriod;
/// use ndis_billing_engine::store::MemoryStore;
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let store = MemoryStore::new();
/// let config = BillingConfig::default();
/// let generator = InvoiceGenerator::new(&store, &store, &store, &store, &config);
///
/// let result = generator.generate(&GenerationRequest {
///     organization_id: Uuid::new_v4(),
///     participant_id: Uuid::new_v4(),
///     period: BillingPeriod {
///         period_start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///         period_end: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     },
/// });
/// ```
pub struct InvoiceGenerator<'a> {
    shifts: &'a dyn ShiftSource,
    rate_cards: &'a dyn RateCardSource,
    holidays: &'a dyn HolidaySource,
    store: &'a dyn InvoiceStore,
    config: &'a BillingConfig,
}

impl<'a> InvoiceGenerator<'a> {
    /// Creates a generator over the given collaborators.
    pub fn new(
        shifts: &'a dyn ShiftSource,
        rate_cards: &'a dyn RateCardSource,
        holidays: &'a dyn HolidaySource,
        store: &'a dyn InvoiceStore,
        config: &'a BillingConfig,
    ) -> Self {
        Self {
            shifts,
            rate_cards,
            holidays,
            store,
            config,
        }
    }

    /// Runs the pipeline and persists a draft invoice.
    ///
    /// # Errors
    ///
    /// - [`BillingError::InvalidDateRange`] - the period is inverted;
    ///   rejected before any fetch
    /// - [`BillingError::NoBillableShifts`] - no completed, uninvoiced
    ///   shifts in the period
    /// - [`BillingError::RatesNotConfigured`] - the organization has no
    ///   active rate cards at all
    /// - [`BillingError::NoLineItemsProducible`] - rates exist but every
    ///   shift was skipped
    ///
    /// Per-shift failures (a missing rate for one support type, an
    /// inconsistent time span) do not abort the run: the shift is skipped
    /// and reported in [`GenerationResult::skipped`].
    pub fn generate(&self, request: &GenerationRequest) -> BillingResult<GenerationResult> {
        request.period.validate()?;

        let already_invoiced = self.store.invoiced_shift_ids(request.participant_id)?;
        let shifts: Vec<_> = self
            .shifts
            .completed_shifts(request.participant_id, &request.period)?
            .into_iter()
            .filter(|s| s.is_billable() && !already_invoiced.contains(&s.id))
            .collect();

        if shifts.is_empty() {
            return Err(BillingError::NoBillableShifts {
                participant_id: request.participant_id,
                period_start: request.period.period_start,
                period_end: request.period.period_end,
            });
        }

        let rate_cards = self.rate_cards.active_rate_cards(request.organization_id)?;
        if rate_cards.is_empty() {
            return Err(BillingError::RatesNotConfigured {
                organization_id: request.organization_id,
            });
        }

        let holidays = self
            .holidays
            .holidays_in_period(request.organization_id, &request.period)?;
        let calendar = HolidayCalendar::from_holidays(&holidays);

        let invoice_id = Uuid::new_v4();
        let mut line_items = Vec::new();
        let mut skipped = Vec::new();

        for shift in &shifts {
            let duration = match resolve_billable_duration(shift) {
                Ok(duration) => duration,
                Err(BillingError::InvalidTimeSpan { message, .. }) => {
                    warn!(
                        shift_id = %shift.id,
                        %message,
                        "Skipping shift with inconsistent times"
                    );
                    skipped.push(SkippedShift {
                        shift_id: shift.id,
                        support_type: shift.support_type.clone(),
                        reason: SkipReason::InvalidTimeSpan { message },
                    });
                    continue;
                }
                Err(other) => return Err(other),
            };

            let day_type = classify_day(shift.service_date(), &calendar);

            let rate = match resolve_rate(&rate_cards, &shift.support_type, day_type) {
                Ok(rate) => rate,
                Err(BillingError::RateNotConfigured { support_type }) => {
                    warn!(
                        shift_id = %shift.id,
                        %support_type,
                        "Skipping shift with no configured rate"
                    );
                    skipped.push(SkippedShift {
                        shift_id: shift.id,
                        support_type: shift.support_type.clone(),
                        reason: SkipReason::RateNotConfigured { support_type },
                    });
                    continue;
                }
                Err(other) => return Err(other),
            };

            let quantity = billable_quantity(duration.billable_minutes);
            line_items.push(InvoiceLineItem {
                id: Uuid::new_v4(),
                invoice_id,
                shift_id: shift.id,
                support_type: shift.support_type.clone(),
                day_type,
                service_date: shift.service_date(),
                scheduled_minutes: duration.scheduled_minutes,
                actual_minutes: duration.actual_minutes,
                billable_minutes: duration.billable_minutes,
                unit_price: rate.unit_price,
                quantity,
                line_total: line_total(quantity, rate.unit_price),
                support_item_code: rate.support_item_code,
            });
        }

        if line_items.is_empty() {
            return Err(BillingError::NoLineItemsProducible {
                skipped: skipped.len(),
            });
        }

        let line_totals: Vec<_> = line_items.iter().map(|item| item.line_total).collect();
        let totals = calculate_invoice_totals(&line_totals, self.config.gst.treatment());

        // Number allocation is the last irreversible step: every abort path
        // above runs before a sequence number is consumed
        let invoice_number = self.store.allocate_invoice_number(request.organization_id)?;
        let invoice = Invoice {
            id: invoice_id,
            organization_id: request.organization_id,
            participant_id: request.participant_id,
            invoice_number,
            period_start: request.period.period_start,
            period_end: request.period.period_end,
            subtotal: totals.subtotal,
            gst: totals.gst,
            total: totals.total,
            status: InvoiceStatus::Draft,
            finalized_at: None,
            finalized_by: None,
            created_at: Utc::now(),
        };

        self.store.insert_invoice(&invoice, &line_items)?;

        info!(
            invoice_number = %invoice.invoice_number,
            participant_id = %request.participant_id,
            line_items = line_items.len(),
            skipped = skipped.len(),
            total = %invoice.total,
            "Generated draft invoice"
        );

        Ok(GenerationResult {
            invoice,
            line_items,
            skipped,
        })
    }
}
