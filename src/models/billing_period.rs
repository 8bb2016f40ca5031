//! Billing period and public holiday models.
//!
//! This module contains the [`BillingPeriod`], [`PublicHoliday`], and
//! [`HolidayCalendar`] types that define the calendar context for invoice
//! generation.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BillingError, BillingResult};

/// Represents a gazetted public holiday for an organization.
///
/// Holidays are tracked per organization so providers operating in
/// different states can carry their own gazetted dates.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::models::PublicHoliday;
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let holiday = PublicHoliday {
///     organization_id: Uuid::new_v4(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
///     name: "Australia Day".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The organization the holiday applies to.
    pub organization_id: Uuid,
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday (e.g., "Australia Day").
    pub name: String,
}

/// A date-indexed view over an organization's public holidays.
///
/// Built once per generation run from the fetched [`PublicHoliday`] rows
/// and consulted by the day-type classifier.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::models::{HolidayCalendar, PublicHoliday};
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let australia_day = NaiveDate::from_ymd_opt(2026, 1, 26).unwrap();
/// let calendar = HolidayCalendar::from_holidays(&[PublicHoliday {
///     organization_id: Uuid::new_v4(),
///     date: australia_day,
///     name: "Australia Day".to_string(),
/// }]);
///
/// assert!(calendar.is_holiday(australia_day));
/// assert!(!calendar.is_holiday(NaiveDate::from_ymd_opt(2026, 1, 27).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Builds a calendar from a set of public holiday rows.
    pub fn from_holidays(holidays: &[PublicHoliday]) -> Self {
        Self {
            dates: holidays.iter().map(|h| h.date).collect(),
        }
    }

    /// Returns true if the given date is a public holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Returns true if the calendar contains no holidays.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Represents the date range an invoice covers.
///
/// Both bounds are inclusive.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::models::BillingPeriod;
/// use chrono::NaiveDate;
///
/// let period = BillingPeriod {
///     period_start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     period_end: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
/// };
///
/// assert!(period.validate().is_ok());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// The start date of the billing period (inclusive).
    pub period_start: NaiveDate,
    /// The end date of the billing period (inclusive).
    pub period_end: NaiveDate,
}

impl BillingPeriod {
    /// Checks that the period is well-formed.
    ///
    /// # Returns
    ///
    /// `Ok(())` when `period_start <= period_end`, otherwise
    /// [`BillingError::InvalidDateRange`]. Generation rejects a malformed
    /// period before any data is fetched.
    pub fn validate(&self) -> BillingResult<()> {
        if self.period_start > self.period_end {
            return Err(BillingError::InvalidDateRange {
                period_start: self.period_start,
                period_end: self.period_end,
            });
        }
        Ok(())
    }

    /// Checks if a given date falls within this billing period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.period_start && date <= self.period_end
    }
}
