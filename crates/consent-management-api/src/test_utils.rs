//! Fixtures shared by unit and integration tests.

use crate::domain::{Consent, ConsentData, ConsentStatus, ServiceUserConsentKey, ServiceUserKey};
use chrono::{DateTime, FixedOffset, TimeZone};

pub const TEST_SERVICE_ID: &str = "TestServiceId";
pub const TEST_USER_ID: &str = "TestUserId";
pub const TEST_CONSENT_ID: &str = "TestConsentId";
pub const TEST_CONSENT_VERSION: u32 = 1;
pub const TEST_CONSENT_STATUS: ConsentStatus = ConsentStatus::Active;
pub const TEST_CONSENT_TYPE: &str = "TestConsentType";

pub fn test_consent_data() -> ConsentData {
    ConsentData::from([
        ("TestKey1".to_string(), "TestValue1".to_string()),
        ("TestKey2".to_string(), "TestValue2".to_string()),
    ])
}

pub fn test_expiry_time() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .and_then(|utc| utc.with_ymd_and_hms(2032, 1, 1, 0, 0, 0).single())
        .expect("valid fixture timestamp")
}

pub fn test_service_user_key() -> ServiceUserKey {
    ServiceUserKey::new(TEST_SERVICE_ID, TEST_USER_ID)
}

pub fn test_consent_key() -> ServiceUserConsentKey {
    ServiceUserConsentKey::new(TEST_SERVICE_ID, TEST_USER_ID, TEST_CONSENT_ID)
}

pub fn test_consent() -> Consent {
    Consent {
        service_id: TEST_SERVICE_ID.to_string(),
        user_id: TEST_USER_ID.to_string(),
        consent_id: TEST_CONSENT_ID.to_string(),
        consent_version: TEST_CONSENT_VERSION,
        status: TEST_CONSENT_STATUS,
        consent_type: Some(TEST_CONSENT_TYPE.to_string()),
        consent_data: Some(test_consent_data()),
        expiry_time: Some(test_expiry_time()),
    }
}

/// `count` consents for the test service user, with ids `TestConsentId-0..count`.
pub fn test_consents(count: usize) -> Vec<Consent> {
    (0..count)
        .map(|i| Consent {
            consent_id: format!("{TEST_CONSENT_ID}-{i}"),
            ..test_consent()
        })
        .collect()
}

/// The next version of `consent` with a new status.
pub fn next_version(consent: &Consent, status: ConsentStatus) -> Consent {
    Consent {
        consent_version: consent.consent_version + 1,
        status,
        ..consent.clone()
    }
}
