//! Core data models for the NDIS billing engine.
//!
//! This module contains all the domain models used throughout the engine.

mod billing_period;
mod generation_result;
mod invoice;
mod organization;
mod rate_card;
mod shift;

pub use billing_period::{BillingPeriod, HolidayCalendar, PublicHoliday};
pub use generation_result::{
    FinalizeOutcome, GenerationResult, SkipReason, SkippedShift, SyncOutcome,
};
pub use invoice::{Invoice, InvoiceLineItem, InvoiceStatus};
pub use organization::{OrganizationProfile, ParticipantProfile};
pub use rate_card::RateCard;
pub use shift::{CheckInWindow, ShiftRecord, ShiftStatus};
