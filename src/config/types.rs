//! Configuration types for the billing engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every field has a
//! default matching standard NDIS billing practice, so a missing or
//! partial file still yields a working configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::billing::GstTreatment;

/// How the organization bills GST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GstMode {
    /// NDIS-funded supports: no GST on invoices.
    GstFree,
    /// Mixed billing: GST charged on the subtotal.
    Taxable,
}

/// GST settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GstConfig {
    /// Whether invoices attract GST.
    pub mode: GstMode,
    /// The GST rate as a fraction (0.10 for 10%).
    pub rate: Decimal,
}

impl Default for GstConfig {
    fn default() -> Self {
        Self {
            mode: GstMode::GstFree,
            rate: Decimal::new(10, 2),
        }
    }
}

impl GstConfig {
    /// Returns the treatment the totals calculator should apply.
    pub fn treatment(&self) -> GstTreatment {
        match self.mode {
            GstMode::GstFree => GstTreatment::GstFree,
            GstMode::Taxable => GstTreatment::Taxable { rate: self.rate },
        }
    }
}

/// Settings for the NDIA bulk-claims export.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClaimsExportConfig {
    /// The GST code emitted on each claim row ("P2" = GST-free).
    pub gst_code: String,
}

impl Default for ClaimsExportConfig {
    fn default() -> Self {
        Self {
            gst_code: "P2".to_string(),
        }
    }
}

/// Settings for the Xero sales-invoice CSV dialect.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct XeroExportConfig {
    /// The revenue account code each row posts to.
    pub account_code: String,
    /// The tax type label Xero expects for GST-free income.
    pub tax_type: String,
}

impl Default for XeroExportConfig {
    fn default() -> Self {
        Self {
            account_code: "200".to_string(),
            tax_type: "GST Free Income".to_string(),
        }
    }
}

/// Settings for the MYOB service-sales CSV dialect.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MyobExportConfig {
    /// The income account each row posts to.
    pub income_account: String,
    /// The MYOB tax code for GST-free sales.
    pub tax_code: String,
}

impl Default for MyobExportConfig {
    fn default() -> Self {
        Self {
            income_account: "4-1000".to_string(),
            tax_code: "FRE".to_string(),
        }
    }
}

/// Per-dialect export settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// NDIA bulk-claims settings.
    pub claims: ClaimsExportConfig,
    /// Xero dialect settings.
    pub xero: XeroExportConfig,
    /// MYOB dialect settings.
    pub myob: MyobExportConfig,
}

/// The complete billing configuration.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::config::{BillingConfig, GstMode};
///
/// let config = BillingConfig::default();
/// assert_eq!(config.gst.mode, GstMode::GstFree);
/// assert_eq!(config.exports.myob.tax_code, "FRE");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// GST settings.
    pub gst: GstConfig,
    /// Export formatter settings.
    pub exports: ExportConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults_are_gst_free() {
        let config = BillingConfig::default();
        assert_eq!(config.gst.mode, GstMode::GstFree);
        assert_eq!(config.gst.rate, Decimal::from_str("0.10").unwrap());
        assert!(matches!(config.gst.treatment(), GstTreatment::GstFree));
    }

    #[test]
    fn test_taxable_mode_carries_rate() {
        let config = GstConfig {
            mode: GstMode::Taxable,
            rate: Decimal::from_str("0.10").unwrap(),
        };
        match config.treatment() {
            GstTreatment::Taxable { rate } => {
                assert_eq!(rate, Decimal::from_str("0.10").unwrap());
            }
            other => panic!("Expected Taxable, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: BillingConfig = serde_yaml::from_str("gst:\n  mode: taxable\n").unwrap();
        assert_eq!(config.gst.mode, GstMode::Taxable);
        // Unspecified sections keep their defaults
        assert_eq!(config.exports.xero.account_code, "200");
        assert_eq!(config.exports.claims.gst_code, "P2");
    }

    #[test]
    fn test_empty_yaml_is_all_defaults() {
        let config: BillingConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.exports.myob.income_account, "4-1000");
    }
}
