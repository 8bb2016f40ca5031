//! NDIS Billing & Claim Export Engine.
//!
//! This crate converts completed disability-support shift records into invoice
//! line items under day-type rate rules, manages the invoice lifecycle from
//! draft through submission, and exports finalized invoices into the NDIA
//! bulk-claims format and two accounting-package CSV dialects.

#![warn(missing_docs)]

pub mod billing;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
