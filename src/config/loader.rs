//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading billing
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{BillingError, BillingResult};

use super::types::BillingConfig;

/// Loads and provides access to the billing configuration.
///
/// # File format
///
/// ```text
/// gst:
///   mode: gst_free        # or: taxable
///   rate: "0.10"
/// exports:
///   claims:
///     gst_code: P2
///   xero:
///     account_code: "200"
///     tax_type: GST Free Income
///   myob:
///     income_account: 4-1000
///     tax_code: FRE
/// ```
///
/// Every section is optional; omitted fields take the GST-free NDIS
/// defaults.
///
/// # Example
///
/// ```no_run
/// use ndis_billing_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/billing.yaml").unwrap();
/// println!("claims GST code: {}", loader.config().exports.claims.gst_code);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: BillingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file (e.g., "./config/billing.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> BillingResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| BillingError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config =
            serde_yaml::from_str(&content).map_err(|e| BillingError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &BillingConfig {
        &self.config
    }
}
