//! Invoice lifecycle operations.
//!
//! This module guards the invoice state machine: finalize is the one-way
//! door from draft to submitted, deletes are draft-only and cascade, and
//! the externally driven paid/overdue/cancelled transitions are validated
//! against [`InvoiceStatus::can_transition_to`].

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{BillingError, BillingResult};
use crate::models::{FinalizeOutcome, Invoice, InvoiceStatus, SyncOutcome};
use crate::store::{AccountingSync, InvoiceStore};

/// Finalizes a draft invoice, moving it to `submitted`.
///
/// Stamps `finalized_at`/`finalized_by`, persists the transition, and then
/// hands the invoice to the accounting sync. The sync is non-blocking by
/// contract: its failure is reported in the returned
/// [`FinalizeOutcome::sync`] and never reverts the finalize.
///
/// # Errors
///
/// - [`BillingError::InvoiceNotFound`] - no such invoice
/// - [`BillingError::AlreadyFinalized`] - the invoice already passed
///   through finalize
/// - [`BillingError::InvalidStatusTransition`] - the invoice is cancelled
pub fn finalize_invoice(
    store: &dyn InvoiceStore,
    sync: &dyn AccountingSync,
    invoice_id: Uuid,
    finalized_by: &str,
) -> BillingResult<FinalizeOutcome> {
    let (mut invoice, line_items) = fetch_required(store, invoice_id)?;

    if invoice.status.is_finalized() {
        return Err(BillingError::AlreadyFinalized {
            invoice_id,
            status: invoice.status,
        });
    }
    if !invoice.status.can_transition_to(InvoiceStatus::Submitted) {
        return Err(BillingError::InvalidStatusTransition {
            invoice_id,
            from: invoice.status,
            to: InvoiceStatus::Submitted,
        });
    }

    invoice.status = InvoiceStatus::Submitted;
    invoice.finalized_at = Some(Utc::now());
    invoice.finalized_by = Some(finalized_by.to_string());
    store.update_invoice(&invoice)?;

    info!(
        invoice_number = %invoice.invoice_number,
        %finalized_by,
        "Finalized invoice"
    );

    // The sync outcome rides alongside the finalize result; an error here
    // must never propagate as a finalize failure
    let sync_outcome = match sync.push_invoice(&invoice, &line_items) {
        Ok(()) => SyncOutcome::Synced,
        Err(reason) => {
            warn!(
                invoice_number = %invoice.invoice_number,
                %reason,
                "Accounting sync failed after finalize"
            );
            SyncOutcome::Failed { reason }
        }
    };

    Ok(FinalizeOutcome {
        invoice,
        sync: sync_outcome,
    })
}

/// Deletes a draft invoice, cascading its line items.
///
/// # Errors
///
/// - [`BillingError::InvoiceNotFound`] - no such invoice
/// - [`BillingError::NotDraft`] - the invoice has left draft; nothing is
///   removed
pub fn delete_invoice(store: &dyn InvoiceStore, invoice_id: Uuid) -> BillingResult<()> {
    let (invoice, _) = fetch_required(store, invoice_id)?;

    if invoice.status != InvoiceStatus::Draft {
        return Err(BillingError::NotDraft {
            invoice_id,
            status: invoice.status,
        });
    }

    // The store re-checks the status atomically before removing rows
    store.delete_draft_invoice(invoice_id)?;
    info!(invoice_number = %invoice.invoice_number, "Deleted draft invoice");
    Ok(())
}

/// Applies an externally driven status transition (paid, overdue,
/// cancelled).
///
/// # Errors
///
/// - [`BillingError::InvoiceNotFound`] - no such invoice
/// - [`BillingError::InvalidStatusTransition`] - the state machine forbids
///   the move
pub fn transition_status(
    store: &dyn InvoiceStore,
    invoice_id: Uuid,
    to: InvoiceStatus,
) -> BillingResult<Invoice> {
    let (mut invoice, _) = fetch_required(store, invoice_id)?;

    if !invoice.status.can_transition_to(to) {
        return Err(BillingError::InvalidStatusTransition {
            invoice_id,
            from: invoice.status,
            to,
        });
    }

    invoice.status = to;
    store.update_invoice(&invoice)?;
    info!(invoice_number = %invoice.invoice_number, status = %to, "Invoice status updated");
    Ok(invoice)
}

fn fetch_required(
    store: &dyn InvoiceStore,
    invoice_id: Uuid,
) -> BillingResult<(Invoice, Vec<crate::models::InvoiceLineItem>)> {
    store
        .fetch_invoice(invoice_id)?
        .ok_or(BillingError::InvoiceNotFound { invoice_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvoiceLineItem;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    /// A sync stub that records what it was asked to push.
    struct RecordingSync {
        pushed: Mutex<Vec<String>>,
        fail_with: Option<String>,
    }

    impl RecordingSync {
        fn ok() -> Self {
            Self {
                pushed: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                pushed: Mutex::new(Vec::new()),
                fail_with: Some(reason.to_string()),
            }
        }
    }

    impl AccountingSync for RecordingSync {
        fn push_invoice(
            &self,
            invoice: &Invoice,
            _line_items: &[InvoiceLineItem],
        ) -> Result<(), String> {
            self.pushed
                .lock()
                .unwrap()
                .push(invoice.invoice_number.clone());
            match &self.fail_with {
                Some(reason) => Err(reason.clone()),
                None => Ok(()),
            }
        }
    }

    fn seed_invoice(store: &MemoryStore, status: InvoiceStatus) -> Uuid {
        let invoice = Invoice {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            participant_id: Uuid::new_v4(),
            invoice_number: "INV-00001".to_string(),
            period_start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            subtotal: Decimal::new(27500, 2),
            gst: Decimal::ZERO,
            total: Decimal::new(27500, 2),
            status,
            finalized_at: None,
            finalized_by: None,
            created_at: Utc::now(),
        };
        store.insert_invoice(&invoice, &[]).unwrap();
        invoice.id
    }

    // ==========================================================================
    // LC-001: finalize moves draft to submitted and stamps the actor
    // ==========================================================================
    #[test]
    fn test_lc_001_finalize_stamps_and_submits() {
        let store = MemoryStore::new();
        let sync = RecordingSync::ok();
        let id = seed_invoice(&store, InvoiceStatus::Draft);

        let outcome = finalize_invoice(&store, &sync, id, "ops@example.org").unwrap();

        assert_eq!(outcome.invoice.status, InvoiceStatus::Submitted);
        assert_eq!(outcome.invoice.finalized_by.as_deref(), Some("ops@example.org"));
        assert!(outcome.invoice.finalized_at.is_some());
        assert!(outcome.sync.is_synced());

        let (stored, _) = store.fetch_invoice(id).unwrap().unwrap();
        assert_eq!(stored.status, InvoiceStatus::Submitted);
    }

    // ==========================================================================
    // LC-002: a sync failure never reverts the finalize
    // ==========================================================================
    #[test]
    fn test_lc_002_sync_failure_does_not_revert() {
        let store = MemoryStore::new();
        let sync = RecordingSync::failing("connection refused");
        let id = seed_invoice(&store, InvoiceStatus::Draft);

        let outcome = finalize_invoice(&store, &sync, id, "ops@example.org").unwrap();

        assert_eq!(
            outcome.sync,
            SyncOutcome::Failed {
                reason: "connection refused".to_string()
            }
        );
        let (stored, _) = store.fetch_invoice(id).unwrap().unwrap();
        assert_eq!(stored.status, InvoiceStatus::Submitted);
    }

    // ==========================================================================
    // LC-003: finalize rejects already-finalized invoices
    // ==========================================================================
    #[test]
    fn test_lc_003_double_finalize_rejected() {
        let store = MemoryStore::new();
        let sync = RecordingSync::ok();
        let id = seed_invoice(&store, InvoiceStatus::Draft);

        finalize_invoice(&store, &sync, id, "ops@example.org").unwrap();
        match finalize_invoice(&store, &sync, id, "ops@example.org").unwrap_err() {
            BillingError::AlreadyFinalized { status, .. } => {
                assert_eq!(status, InvoiceStatus::Submitted);
            }
            other => panic!("Expected AlreadyFinalized, got {:?}", other),
        }
        // Only the first finalize reached the sync
        assert_eq!(sync.pushed.lock().unwrap().len(), 1);
    }

    // ==========================================================================
    // LC-004: a cancelled invoice cannot be finalized
    // ==========================================================================
    #[test]
    fn test_lc_004_finalize_cancelled_rejected() {
        let store = MemoryStore::new();
        let sync = RecordingSync::ok();
        let id = seed_invoice(&store, InvoiceStatus::Cancelled);

        assert!(matches!(
            finalize_invoice(&store, &sync, id, "ops@example.org").unwrap_err(),
            BillingError::InvalidStatusTransition { .. }
        ));
        assert!(sync.pushed.lock().unwrap().is_empty());
    }

    // ==========================================================================
    // LC-005: delete is draft-only
    // ==========================================================================
    #[test]
    fn test_lc_005_delete_draft_only() {
        let store = MemoryStore::new();
        let draft = seed_invoice(&store, InvoiceStatus::Draft);
        let submitted = seed_invoice(&store, InvoiceStatus::Submitted);

        delete_invoice(&store, draft).unwrap();
        assert!(store.fetch_invoice(draft).unwrap().is_none());

        assert!(matches!(
            delete_invoice(&store, submitted).unwrap_err(),
            BillingError::NotDraft { .. }
        ));
        assert!(store.fetch_invoice(submitted).unwrap().is_some());
    }

    // ==========================================================================
    // LC-006: externally driven transitions respect the state machine
    // ==========================================================================
    #[test]
    fn test_lc_006_external_transitions() {
        let store = MemoryStore::new();
        let id = seed_invoice(&store, InvoiceStatus::Submitted);

        let invoice = transition_status(&store, id, InvoiceStatus::Overdue).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Overdue);

        let invoice = transition_status(&store, id, InvoiceStatus::Paid).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Paid);

        // Paid is terminal
        assert!(matches!(
            transition_status(&store, id, InvoiceStatus::Cancelled).unwrap_err(),
            BillingError::InvalidStatusTransition { .. }
        ));
    }

    #[test]
    fn test_operations_on_missing_invoice_are_not_found() {
        let store = MemoryStore::new();
        let sync = RecordingSync::ok();
        let missing = Uuid::new_v4();

        assert!(matches!(
            finalize_invoice(&store, &sync, missing, "x").unwrap_err(),
            BillingError::InvoiceNotFound { .. }
        ));
        assert!(matches!(
            delete_invoice(&store, missing).unwrap_err(),
            BillingError::InvoiceNotFound { .. }
        ));
        assert!(matches!(
            transition_status(&store, missing, InvoiceStatus::Paid).unwrap_err(),
            BillingError::InvoiceNotFound { .. }
        ));
    }
}
