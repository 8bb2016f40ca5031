//! Day-type classification logic.
//!
//! This module determines the day type (weekday, Saturday, Sunday, public
//! holiday) for a calendar date. The day type selects which rate-card price
//! applies to a shift.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::HolidayCalendar;

/// Represents the type of day for rate selection.
///
/// Each rate card carries one price per day type.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::billing::DayType;
///
/// let day_type = DayType::PublicHoliday;
/// assert_eq!(day_type.to_string(), "Public holiday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday, not a public holiday.
    Weekday,
    /// Saturday, not a public holiday.
    Saturday,
    /// Sunday, not a public holiday.
    Sunday,
    /// A gazetted public holiday, whatever weekday it falls on.
    PublicHoliday,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
            DayType::PublicHoliday => write!(f, "Public holiday"),
        }
    }
}

/// Classifies a calendar date against an organization's holiday calendar.
///
/// Public holidays take precedence over the day of the week: a holiday
/// falling on a Saturday or Sunday classifies as
/// [`DayType::PublicHoliday`]. The precedence is fixed, not configurable.
///
/// This is a pure function: the same (date, calendar) input always
/// produces the same classification.
///
/// # Arguments
///
/// * `date` - The date to classify, in the organization's local calendar
/// * `holidays` - The organization's gazetted public holidays
///
/// # Example
///
/// ```
/// use ndis_billing_engine::billing::{DayType, classify_day};
/// use ndis_billing_engine::models::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::default();
///
/// // 2026-01-17 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
/// assert_eq!(classify_day(saturday, &calendar), DayType::Saturday);
///
/// // 2026-01-12 is a Monday
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// assert_eq!(classify_day(monday, &calendar), DayType::Weekday);
/// ```
pub fn classify_day(date: NaiveDate, holidays: &HolidayCalendar) -> DayType {
    if holidays.is_holiday(date) {
        return DayType::PublicHoliday;
    }
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PublicHoliday;
    use uuid::Uuid;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn calendar_with(dates: &[&str]) -> HolidayCalendar {
        let org = Uuid::new_v4();
        let holidays: Vec<PublicHoliday> = dates
            .iter()
            .map(|d| PublicHoliday {
                organization_id: org,
                date: make_date(d),
                name: "Test holiday".to_string(),
            })
            .collect();
        HolidayCalendar::from_holidays(&holidays)
    }

    // ==========================================================================
    // DT-001: Monday through Friday are weekdays
    // ==========================================================================
    #[test]
    fn test_dt_001_weekdays_classify_as_weekday() {
        let calendar = HolidayCalendar::default();
        // 2026-01-12 through 2026-01-16 are Monday through Friday
        for day in 12..=16 {
            let date = NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
            assert_eq!(classify_day(date, &calendar), DayType::Weekday, "{}", date);
        }
    }

    // ==========================================================================
    // DT-002: Saturday is Saturday
    // ==========================================================================
    #[test]
    fn test_dt_002_saturday_is_saturday() {
        let calendar = HolidayCalendar::default();
        // 2026-01-17 is a Saturday
        assert_eq!(
            classify_day(make_date("2026-01-17"), &calendar),
            DayType::Saturday
        );
    }

    // ==========================================================================
    // DT-003: Sunday is Sunday
    // ==========================================================================
    #[test]
    fn test_dt_003_sunday_is_sunday() {
        let calendar = HolidayCalendar::default();
        // 2026-01-18 is a Sunday
        assert_eq!(
            classify_day(make_date("2026-01-18"), &calendar),
            DayType::Sunday
        );
    }

    // ==========================================================================
    // DT-004: a holiday on a weekday classifies as public holiday
    // ==========================================================================
    #[test]
    fn test_dt_004_weekday_holiday_is_public_holiday() {
        // 2026-01-26 (Australia Day) is a Monday
        let calendar = calendar_with(&["2026-01-26"]);
        assert_eq!(
            classify_day(make_date("2026-01-26"), &calendar),
            DayType::PublicHoliday
        );
    }

    // ==========================================================================
    // DT-005: holiday precedence beats Saturday and Sunday
    // ==========================================================================
    #[test]
    fn test_dt_005_weekend_holiday_is_public_holiday() {
        // 2026-04-04 is Easter Saturday, 2026-04-05 is Easter Sunday
        let calendar = calendar_with(&["2026-04-04", "2026-04-05"]);
        assert_eq!(
            classify_day(make_date("2026-04-04"), &calendar),
            DayType::PublicHoliday
        );
        assert_eq!(
            classify_day(make_date("2026-04-05"), &calendar),
            DayType::PublicHoliday
        );
    }

    // ==========================================================================
    // DT-006: the day before and after a holiday are unaffected
    // ==========================================================================
    #[test]
    fn test_dt_006_neighbouring_days_unaffected() {
        let calendar = calendar_with(&["2026-01-26"]);
        // 2026-01-25 is a Sunday, 2026-01-27 a Tuesday
        assert_eq!(
            classify_day(make_date("2026-01-25"), &calendar),
            DayType::Sunday
        );
        assert_eq!(
            classify_day(make_date("2026-01-27"), &calendar),
            DayType::Weekday
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let calendar = calendar_with(&["2026-12-25"]);
        let date = make_date("2026-12-25");
        assert_eq!(
            classify_day(date, &calendar),
            classify_day(date, &calendar)
        );
    }

    #[test]
    fn test_day_type_display() {
        assert_eq!(DayType::Weekday.to_string(), "Weekday");
        assert_eq!(DayType::Saturday.to_string(), "Saturday");
        assert_eq!(DayType::Sunday.to_string(), "Sunday");
        assert_eq!(DayType::PublicHoliday.to_string(), "Public holiday");
    }

    #[test]
    fn test_day_type_serialization() {
        let json = serde_json::to_string(&DayType::PublicHoliday).unwrap();
        assert_eq!(json, "\"public_holiday\"");

        let deserialized: DayType = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, DayType::PublicHoliday);
    }
}
