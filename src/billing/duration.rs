//! Billable-duration resolution logic.
//!
//! This module reconciles a shift's rostered window with the worked window
//! recorded by check-in/check-out, producing the minutes that may actually
//! be billed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, BillingResult};
use crate::models::ShiftRecord;

/// The resolved spans for one shift, in whole minutes.
///
/// The raw scheduled and actual spans are kept alongside the billable
/// figure so they can be persisted on the line item for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillableDuration {
    /// The rostered span in minutes.
    pub scheduled_minutes: i64,
    /// The checked-in span in minutes, when a check-in was recorded.
    pub actual_minutes: Option<i64>,
    /// The minutes that may be billed.
    pub billable_minutes: i64,
}

/// Resolves the billable duration for a shift.
///
/// The policy is "lesser of scheduled vs. actual": when a check-in window
/// exists, `billable = min(scheduled_span, actual_span)`, so a worker who
/// stays late or checks in early cannot inflate billing beyond the roster,
/// and a worker who leaves early cannot bill more than was worked. A shift
/// with no check-in (admin-entered or overridden) bills its full scheduled
/// span.
///
/// Spans are measured in whole minutes, rounding the second-level
/// difference to the nearest minute.
///
/// # Errors
///
/// Returns [`BillingError::InvalidTimeSpan`] when either window ends at or
/// before its own start. Inconsistent times are a data-integrity fault on
/// the shift; the resolver fails loudly rather than billing zero or a
/// negative span.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::billing::resolve_billable_duration;
/// use ndis_billing_engine::models::{CheckInWindow, ShiftRecord, ShiftStatus};
/// use chrono::NaiveDateTime;
/// use uuid::Uuid;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let shift = ShiftRecord {
///     id: Uuid::new_v4(),
///     participant_id: Uuid::new_v4(),
///     support_type: "personal_care".to_string(),
///     scheduled_start: at("2026-01-12 09:00:00"),
///     scheduled_end: at("2026-01-12 12:00:00"),
///     actual: Some(CheckInWindow {
///         start: at("2026-01-12 09:05:00"),
///         end: at("2026-01-12 11:50:00"),
///     }),
///     status: ShiftStatus::Completed,
/// };
///
/// let duration = resolve_billable_duration(&shift).unwrap();
/// assert_eq!(duration.scheduled_minutes, 180);
/// assert_eq!(duration.actual_minutes, Some(165));
/// assert_eq!(duration.billable_minutes, 165);
/// ```
pub fn resolve_billable_duration(shift: &ShiftRecord) -> BillingResult<BillableDuration> {
    if shift.scheduled_end <= shift.scheduled_start {
        return Err(BillingError::InvalidTimeSpan {
            shift_id: shift.id,
            message: format!(
                "scheduled end {} is not after scheduled start {}",
                shift.scheduled_end, shift.scheduled_start
            ),
        });
    }

    let scheduled_minutes = span_minutes(shift.scheduled_start, shift.scheduled_end);

    let actual_minutes = match &shift.actual {
        Some(window) => {
            if window.end <= window.start {
                return Err(BillingError::InvalidTimeSpan {
                    shift_id: shift.id,
                    message: format!(
                        "actual end {} is not after actual start {}",
                        window.end, window.start
                    ),
                });
            }
            Some(span_minutes(window.start, window.end))
        }
        None => None,
    };

    let billable_minutes = match actual_minutes {
        Some(actual) => scheduled_minutes.min(actual),
        None => scheduled_minutes,
    };

    Ok(BillableDuration {
        scheduled_minutes,
        actual_minutes,
        billable_minutes,
    })
}

/// Returns the span between two datetimes, rounded to the nearest minute.
fn span_minutes(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let seconds = (end - start).num_seconds();
    (seconds + 30).div_euclid(60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CheckInWindow, ShiftStatus};
    use uuid::Uuid;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_shift(
        scheduled: (&str, &str),
        actual: Option<(&str, &str)>,
    ) -> ShiftRecord {
        ShiftRecord {
            id: Uuid::new_v4(),
            participant_id: Uuid::new_v4(),
            support_type: "personal_care".to_string(),
            scheduled_start: make_datetime("2026-01-12", scheduled.0),
            scheduled_end: make_datetime("2026-01-12", scheduled.1),
            actual: actual.map(|(start, end)| CheckInWindow {
                start: make_datetime("2026-01-12", start),
                end: make_datetime("2026-01-12", end),
            }),
            status: ShiftStatus::Completed,
        }
    }

    // ==========================================================================
    // BD-001: late check-in and early check-out bill the actual span
    // ==========================================================================
    #[test]
    fn test_bd_001_lesser_of_takes_shorter_actual() {
        let shift = make_shift(("09:00:00", "12:00:00"), Some(("09:05:00", "11:50:00")));
        let duration = resolve_billable_duration(&shift).unwrap();

        assert_eq!(duration.scheduled_minutes, 180);
        assert_eq!(duration.actual_minutes, Some(165));
        assert_eq!(duration.billable_minutes, 165);
    }

    // ==========================================================================
    // BD-002: overstaying cannot bill beyond the scheduled span
    // ==========================================================================
    #[test]
    fn test_bd_002_overstay_capped_at_scheduled() {
        let shift = make_shift(("09:00:00", "12:00:00"), Some(("08:45:00", "12:30:00")));
        let duration = resolve_billable_duration(&shift).unwrap();

        assert_eq!(duration.scheduled_minutes, 180);
        assert_eq!(duration.actual_minutes, Some(225));
        assert_eq!(duration.billable_minutes, 180);
    }

    // ==========================================================================
    // BD-003: no check-in falls back to the scheduled span
    // ==========================================================================
    #[test]
    fn test_bd_003_no_check_in_bills_scheduled() {
        let shift = make_shift(("09:00:00", "12:00:00"), None);
        let duration = resolve_billable_duration(&shift).unwrap();

        assert_eq!(duration.scheduled_minutes, 180);
        assert_eq!(duration.actual_minutes, None);
        assert_eq!(duration.billable_minutes, 180);
    }

    // ==========================================================================
    // BD-004: equal spans bill the shared figure
    // ==========================================================================
    #[test]
    fn test_bd_004_exact_attendance() {
        let shift = make_shift(("09:00:00", "12:00:00"), Some(("09:00:00", "12:00:00")));
        let duration = resolve_billable_duration(&shift).unwrap();
        assert_eq!(duration.billable_minutes, 180);
    }

    // ==========================================================================
    // BD-005: inverted actual window fails loudly
    // ==========================================================================
    #[test]
    fn test_bd_005_inverted_actual_window_is_rejected() {
        let shift = make_shift(("09:00:00", "12:00:00"), Some(("11:50:00", "09:05:00")));
        let result = resolve_billable_duration(&shift);

        match result.unwrap_err() {
            BillingError::InvalidTimeSpan { shift_id, message } => {
                assert_eq!(shift_id, shift.id);
                assert!(message.contains("actual end"));
            }
            other => panic!("Expected InvalidTimeSpan, got {:?}", other),
        }
    }

    // ==========================================================================
    // BD-006: zero-length actual window is also a fault
    // ==========================================================================
    #[test]
    fn test_bd_006_zero_length_actual_window_is_rejected() {
        let shift = make_shift(("09:00:00", "12:00:00"), Some(("09:00:00", "09:00:00")));
        assert!(resolve_billable_duration(&shift).is_err());
    }

    // ==========================================================================
    // BD-007: inverted scheduled window is rejected before anything else
    // ==========================================================================
    #[test]
    fn test_bd_007_inverted_scheduled_window_is_rejected() {
        let shift = make_shift(("12:00:00", "09:00:00"), None);
        match resolve_billable_duration(&shift).unwrap_err() {
            BillingError::InvalidTimeSpan { message, .. } => {
                assert!(message.contains("scheduled end"));
            }
            other => panic!("Expected InvalidTimeSpan, got {:?}", other),
        }
    }

    #[test]
    fn test_seconds_round_to_nearest_minute() {
        // 29 seconds round down, 30 seconds round up
        let shift = make_shift(("09:00:00", "10:00:29"), None);
        assert_eq!(
            resolve_billable_duration(&shift).unwrap().billable_minutes,
            60
        );

        let shift = make_shift(("09:00:00", "10:00:30"), None);
        assert_eq!(
            resolve_billable_duration(&shift).unwrap().billable_minutes,
            61
        );
    }

    #[test]
    fn test_overnight_shift_spans_midnight() {
        let shift = ShiftRecord {
            id: Uuid::new_v4(),
            participant_id: Uuid::new_v4(),
            support_type: "overnight_support".to_string(),
            scheduled_start: make_datetime("2026-01-17", "22:00:00"),
            scheduled_end: make_datetime("2026-01-18", "06:00:00"),
            actual: None,
            status: ShiftStatus::Completed,
        };
        assert_eq!(
            resolve_billable_duration(&shift).unwrap().billable_minutes,
            480
        );
    }

    #[test]
    fn test_lesser_of_invariant_holds() {
        let shift = make_shift(("09:00:00", "17:00:00"), Some(("09:12:00", "16:41:00")));
        let duration = resolve_billable_duration(&shift).unwrap();
        assert!(duration.billable_minutes <= duration.scheduled_minutes);
        assert!(duration.billable_minutes <= duration.actual_minutes.unwrap());
    }
}
