//! Shift record model and related types.
//!
//! This module defines the [`ShiftRecord`] struct representing a rostered
//! support shift as read from the scheduling system, together with its
//! status and optional check-in window.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The workflow status of a shift.
///
/// Only [`ShiftStatus::Completed`] shifts are eligible for billing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Rostered but not yet started.
    Scheduled,
    /// The worker has checked in but not out.
    InProgress,
    /// The shift finished and was signed off.
    Completed,
    /// The shift was cancelled before or during delivery.
    Cancelled,
}

/// The actual worked window recorded by a check-in/check-out event.
///
/// The two timestamps are recorded together by the check-in flow; a shift
/// either has both or has neither, which is why they are modelled as one
/// optional pair rather than two independent options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInWindow {
    /// When the worker checked in.
    pub start: NaiveDateTime,
    /// When the worker checked out.
    pub end: NaiveDateTime,
}

/// Represents a rostered support shift.
///
/// Timestamps are naive and interpreted in the organization's local
/// calendar, matching how the scheduling system records them.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::models::{ShiftRecord, ShiftStatus};
/// use chrono::NaiveDateTime;
/// use uuid::Uuid;
///
/// let shift = ShiftRecord {
///     id: Uuid::new_v4(),
///     participant_id: Uuid::new_v4(),
///     support_type: "personal_care".to_string(),
///     scheduled_start: NaiveDateTime::parse_from_str("2026-01-12 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     scheduled_end: NaiveDateTime::parse_from_str("2026-01-12 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     actual: None,
///     status: ShiftStatus::Completed,
/// };
/// assert!(shift.is_billable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Unique identifier for the shift.
    pub id: Uuid,
    /// The participant who received the support.
    pub participant_id: Uuid,
    /// The support type code (e.g., "personal_care", "community_access").
    pub support_type: String,
    /// The rostered start time.
    pub scheduled_start: NaiveDateTime,
    /// The rostered end time.
    pub scheduled_end: NaiveDateTime,
    /// The actual worked window, if a check-in/out was recorded.
    #[serde(default)]
    pub actual: Option<CheckInWindow>,
    /// The workflow status of the shift.
    pub status: ShiftStatus,
}

impl ShiftRecord {
    /// Returns true if the shift is eligible for billing.
    pub fn is_billable(&self) -> bool {
        self.status == ShiftStatus::Completed
    }

    /// Returns the calendar date the service was delivered on.
    ///
    /// Day-type classification and line-item service dates use the
    /// scheduled start's local calendar day.
    pub fn service_date(&self) -> NaiveDate {
        self.scheduled_start.date()
    }
}
