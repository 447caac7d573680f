//! # Domain Entities
//!
//! Consents and the API models exchanged with callers.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentStatus {
    Active,
    Expired,
    Revoked,
}

impl ConsentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentStatus::Active => "ACTIVE",
            ConsentStatus::Expired => "EXPIRED",
            ConsentStatus::Revoked => "REVOKED",
        }
    }
}

impl fmt::Display for ConsentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown consent status: {0}")]
pub struct UnknownConsentStatus(pub String);

impl FromStr for ConsentStatus {
    type Err = UnknownConsentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(ConsentStatus::Active),
            "EXPIRED" => Ok(ConsentStatus::Expired),
            "REVOKED" => Ok(ConsentStatus::Revoked),
            other => Err(UnknownConsentStatus(other.to_string())),
        }
    }
}

/// Free-form key/value data attached to a consent.
pub type ConsentData = BTreeMap<String, String>;

/// A consent a user granted to a service.
///
/// `consent_version` starts at 1 and increases by exactly one per update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consent {
    pub service_id: String,
    pub user_id: String,
    pub consent_id: String,
    pub consent_version: u32,
    pub status: ConsentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_data: Option<ConsentData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<DateTime<FixedOffset>>,
}

impl Consent {
    pub fn key(&self) -> ServiceUserConsentKey {
        ServiceUserConsentKey::new(&self.service_id, &self.user_id, &self.consent_id)
    }

    pub fn service_user_key(&self) -> ServiceUserKey {
        ServiceUserKey::new(&self.service_id, &self.user_id)
    }
}

/// Identity of a single consent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceUserConsentKey {
    pub service_id: String,
    pub user_id: String,
    pub consent_id: String,
}

impl ServiceUserConsentKey {
    pub fn new(
        service_id: impl Into<String>,
        user_id: impl Into<String>,
        consent_id: impl Into<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            user_id: user_id.into(),
            consent_id: consent_id.into(),
        }
    }

    pub fn service_user_key(&self) -> ServiceUserKey {
        ServiceUserKey::new(&self.service_id, &self.user_id)
    }
}

impl fmt::Display for ServiceUserConsentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "serviceId {}, userId {}, consentId {}",
            self.service_id, self.user_id, self.consent_id
        )
    }
}

/// All consents of one user for one service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceUserKey {
    pub service_id: String,
    pub user_id: String,
}

impl ServiceUserKey {
    pub fn new(service_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            user_id: user_id.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// API models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceUserConsentRequestContent {
    #[serde(default)]
    pub status: Option<ConsentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_data: Option<ConsentData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceUserConsentResponseContent {
    pub consent_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetServiceUserConsentResponseContent {
    pub data: Consent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListServiceUserConsentResponseContent {
    pub data: Vec<Consent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceUserConsentRequestContent {
    #[serde(default)]
    pub consent_version: Option<u32>,
    #[serde(default)]
    pub status: Option<ConsentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_data: Option<ConsentData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<DateTime<FixedOffset>>,
}
