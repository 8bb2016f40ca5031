//! Rate resolution logic.
//!
//! This module selects the applicable per-hour price for a support type and
//! day type from an organization's active rate cards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::billing::DayType;
use crate::error::{BillingError, BillingResult};
use crate::models::RateCard;

/// The outcome of a rate lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRate {
    /// The rate card the price came from.
    pub rate_card_id: Uuid,
    /// The price per hour for the requested day type.
    pub unit_price: Decimal,
    /// The NDIS support item number carried on the card, if any.
    pub support_item_code: Option<String>,
}

/// Resolves the unit price for a support type on a given day type.
///
/// Only active cards are consulted. When more than one active card matches
/// the support type, the one with the latest `effective_from` wins; the
/// persistence layer is expected to keep at most one active per support
/// type, so the tiebreak only matters during rate changeovers.
///
/// # Errors
///
/// Returns [`BillingError::RateNotConfigured`] when no active card covers
/// the support type. A missing rate is a hard error, never a zero price.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::billing::{DayType, resolve_rate};
/// use ndis_billing_engine::models::RateCard;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let cards = vec![RateCard {
///     id: Uuid::new_v4(),
///     organization_id: Uuid::new_v4(),
///     support_type: "personal_care".to_string(),
///     weekday_rate: Decimal::new(6547, 2),
///     saturday_rate: Decimal::new(9212, 2),
///     sunday_rate: Decimal::new(11877, 2),
///     public_holiday_rate: Decimal::new(14542, 2),
///     support_item_code: None,
///     is_active: true,
///     effective_from: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
/// }];
///
/// let resolved = resolve_rate(&cards, "personal_care", DayType::Sunday).unwrap();
/// assert_eq!(resolved.unit_price, Decimal::new(11877, 2));
///
/// assert!(resolve_rate(&cards, "community_access", DayType::Weekday).is_err());
/// ```
pub fn resolve_rate(
    rate_cards: &[RateCard],
    support_type: &str,
    day_type: DayType,
) -> BillingResult<ResolvedRate> {
    let card = rate_cards
        .iter()
        .filter(|c| c.is_active && c.support_type == support_type)
        .max_by_key(|c| c.effective_from);

    match card {
        Some(card) => Ok(ResolvedRate {
            rate_card_id: card.id,
            unit_price: card.rate_for(day_type),
            support_item_code: card.support_item_code.clone(),
        }),
        None => Err(BillingError::RateNotConfigured {
            support_type: support_type.to_string(),
        }),
    }
}
