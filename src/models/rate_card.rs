//! Rate card model.
//!
//! This module defines the [`RateCard`] struct carrying an organization's
//! configured prices for one support type, with one price per day type.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::billing::DayType;

/// An organization's configured rates for one support type.
///
/// A rate card carries one price per day type. At most one card is active
/// per (organization, support type) at any time the engine consults it; the
/// rate resolver treats "none active" as a hard error, never a zero price.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::billing::DayType;
/// use ndis_billing_engine::models::RateCard;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let card = RateCard {
///     id: Uuid::new_v4(),
///     organization_id: Uuid::new_v4(),
///     support_type: "personal_care".to_string(),
///     weekday_rate: Decimal::new(6547, 2),        // 65.47
///     saturday_rate: Decimal::new(9212, 2),       // 92.12
///     sunday_rate: Decimal::new(11877, 2),        // 118.77
///     public_holiday_rate: Decimal::new(14542, 2), // 145.42
///     support_item_code: Some("01_011_0107_1_1".to_string()),
///     is_active: true,
///     effective_from: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
/// };
///
/// assert_eq!(card.rate_for(DayType::Saturday), Decimal::new(9212, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    /// Unique identifier for the rate card.
    pub id: Uuid,
    /// The organization the card belongs to.
    pub organization_id: Uuid,
    /// The support type code this card prices (e.g., "personal_care").
    pub support_type: String,
    /// Price per hour on Monday through Friday.
    pub weekday_rate: Decimal,
    /// Price per hour on Saturday.
    pub saturday_rate: Decimal,
    /// Price per hour on Sunday.
    pub sunday_rate: Decimal,
    /// Price per hour on a gazetted public holiday.
    pub public_holiday_rate: Decimal,
    /// The NDIS price-guide support item number, used by the claims export.
    #[serde(default)]
    pub support_item_code: Option<String>,
    /// Whether this card is currently in force.
    pub is_active: bool,
    /// The date this card came into force.
    pub effective_from: NaiveDate,
}

impl RateCard {
    /// Returns the configured price per hour for the given day type.
    ///
    /// The card carries one price per day type; this is a straight
    /// projection with no interpolation or tiering.
    pub fn rate_for(&self, day_type: DayType) -> Decimal {
        match day_type {
            DayType::Weekday => self.weekday_rate,
            DayType::Saturday => self.saturday_rate,
            DayType::Sunday => self.sunday_rate,
            DayType::PublicHoliday => self.public_holiday_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_card() -> RateCard {
        RateCard {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            support_type: "personal_care".to_string(),
            weekday_rate: dec("65.47"),
            saturday_rate: dec("92.12"),
            sunday_rate: dec("118.77"),
            public_holiday_rate: dec("145.42"),
            support_item_code: Some("01_011_0107_1_1".to_string()),
            is_active: true,
            effective_from: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        }
    }

    #[test]
    fn test_rate_for_projects_each_day_type() {
        let card = make_card();
        assert_eq!(card.rate_for(DayType::Weekday), dec("65.47"));
        assert_eq!(card.rate_for(DayType::Saturday), dec("92.12"));
        assert_eq!(card.rate_for(DayType::Sunday), dec("118.77"));
        assert_eq!(card.rate_for(DayType::PublicHoliday), dec("145.42"));
    }

    #[test]
    fn test_rate_card_serialization_round_trip() {
        let card = make_card();
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: RateCard = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }

    #[test]
    fn test_support_item_code_defaults_to_none() {
        let json = r#"{
            "id": "7b6f8f4a-7a2e-4a6e-9d5a-0f2f64f4a1aa",
            "organization_id": "f2a1b8c4-3d5e-4f6a-8b9c-0d1e2f3a4b5c",
            "support_type": "gardening",
            "weekday_rate": "55.00",
            "saturday_rate": "77.00",
            "sunday_rate": "99.00",
            "public_holiday_rate": "121.00",
            "is_active": true,
            "effective_from": "2025-07-01"
        }"#;

        let card: RateCard = serde_json::from_str(json).unwrap();
        assert!(card.support_item_code.is_none());
    }
}
