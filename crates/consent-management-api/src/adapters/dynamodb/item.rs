//! # DynamoDB Item Model
//!
//! Attribute values and the stored shape of a consent. This model is
//! independent of the AWS SDK so mappers and the in-memory table work
//! without it.

use crate::domain::ServiceUserConsentKey;
use std::collections::HashMap;

pub const DEFAULT_TABLE_NAME: &str = "ServiceUserConsent";
pub const DEFAULT_SERVICE_USER_INDEX_NAME: &str = "ServiceUserIndex";

/// Attribute names of a stored consent item.
pub mod attribute {
    /// Partition key of the table.
    pub const ID: &str = "id";
    /// Partition key of the service user index.
    pub const SERVICE_ID: &str = "serviceId";
    /// Sort key of the service user index.
    pub const USER_ID: &str = "userId";
    pub const CONSENT_ID: &str = "consentId";
    pub const CONSENT_VERSION: &str = "consentVersion";
    pub const CONSENT_STATUS: &str = "consentStatus";
    pub const CONSENT_TYPE: &str = "consentType";
    pub const CONSENT_DATA: &str = "consentData";
    pub const EXPIRY_TIME: &str = "expiryTime";
}

const ID_SEPARATOR: &str = "|";

/// A DynamoDB attribute value, restricted to the types consent items use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    S(String),
    /// Numbers travel as their decimal string form, as on the wire.
    N(String),
    Bool(bool),
    M(HashMap<String, AttributeValue>),
    Null,
}

impl AttributeValue {
    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_n(&self) -> Option<&str> {
        match self {
            AttributeValue::N(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_m(&self) -> Option<&HashMap<String, AttributeValue>> {
        match self {
            AttributeValue::M(m) => Some(m),
            _ => None,
        }
    }
}

/// A full item or key, as attribute name to value.
pub type Item = HashMap<String, AttributeValue>;

/// Partition key value for a consent: `serviceId|userId|consentId`.
pub fn consent_item_id(key: &ServiceUserConsentKey) -> String {
    [
        key.service_id.as_str(),
        key.user_id.as_str(),
        key.consent_id.as_str(),
    ]
    .join(ID_SEPARATOR)
}

/// Stored form of a consent, one field per item attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamoDbServiceUserConsent {
    pub id: String,
    pub service_id: String,
    pub user_id: String,
    pub consent_id: String,
    pub consent_version: u32,
    pub consent_status: String,
    pub consent_type: Option<String>,
    pub consent_data: Option<HashMap<String, String>>,
    /// RFC 3339 timestamp with offset.
    pub expiry_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_joins_key_parts() {
        let key = ServiceUserConsentKey::new("TestServiceId", "TestUserId", "TestConsentId");
        assert_eq!(consent_item_id(&key), "TestServiceId|TestUserId|TestConsentId");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(AttributeValue::S("a".into()).as_s(), Some("a"));
        assert_eq!(AttributeValue::N("1".into()).as_n(), Some("1"));
        assert!(AttributeValue::Bool(true).as_s().is_none());
        assert!(AttributeValue::Null.as_m().is_none());
    }
}
