//! Organization and participant profile models.
//!
//! These are the slices of the provider's registration data and the
//! participant's NDIS identity that the billing engine and the claim
//! exports need. Anything else about organizations and participants lives
//! outside this engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The billing-relevant profile of a service-provider organization.
///
/// The registration number and ABN are optional here because providers can
/// generate internal invoices before completing NDIS registration; the
/// claims export validates their presence before producing a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    /// Unique identifier for the organization.
    pub id: Uuid,
    /// The organization's trading name.
    pub name: String,
    /// Australian Business Number.
    #[serde(default)]
    pub abn: Option<String>,
    /// NDIS provider registration number.
    #[serde(default)]
    pub ndis_registration_number: Option<String>,
}

/// The billing-relevant profile of a support participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    /// Unique identifier for the participant.
    pub id: Uuid,
    /// The organization the participant is served by.
    pub organization_id: Uuid,
    /// The participant's given name.
    pub first_name: String,
    /// The participant's family name.
    pub last_name: String,
    /// The participant's NDIS number, required by the claims export.
    #[serde(default)]
    pub ndis_number: Option<String>,
}

impl ParticipantProfile {
    /// Returns the participant's display name ("First Last").
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
