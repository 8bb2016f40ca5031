//! Configuration for the NDIS billing engine.
//!
//! This module provides the strongly-typed billing configuration and the
//! loader that reads it from a YAML file.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BillingConfig, ClaimsExportConfig, ExportConfig, GstConfig, GstMode, MyobExportConfig,
    XeroExportConfig,
};
