//! # Validators
//!
//! Input checks shared by the service and the repositories. Each check
//! reports the first violation it finds.

use super::entities::{
    Consent, CreateServiceUserConsentRequestContent, UpdateServiceUserConsentRequestContent,
};
use shared_api::{ApiError, ApiResult};

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require_not_blank(value: &str, name: &str) -> ApiResult<()> {
    if is_blank(value) {
        Err(ApiError::bad_request(format!("{name} must not be blank")))
    } else {
        Ok(())
    }
}

pub struct ConsentValidator;

impl ConsentValidator {
    /// Check the key fields of a consent.
    pub fn validate(consent: &Consent) -> ApiResult<()> {
        require_not_blank(&consent.service_id, "serviceId")?;
        require_not_blank(&consent.user_id, "userId")?;
        require_not_blank(&consent.consent_id, "consentId")?;
        Ok(())
    }

    /// An update must carry exactly the stored version plus one.
    pub fn validate_next_consent_version(existing: u32, updated: u32) -> ApiResult<()> {
        let expected = u64::from(existing) + 1;
        if u64::from(updated) == expected {
            Ok(())
        } else {
            Err(ApiError::conflict(format!(
                "Expected consent version {expected}, received {updated}, indicating state conflict"
            )))
        }
    }
}

pub struct CreateServiceUserConsentRequestValidator;

impl CreateServiceUserConsentRequestValidator {
    pub fn validate(
        content: Option<&CreateServiceUserConsentRequestContent>,
    ) -> ApiResult<&CreateServiceUserConsentRequestContent> {
        match content {
            Some(content) if content.status.is_some() => Ok(content),
            _ => Err(ApiError::bad_request(
                "Missing required inputs, must provide status",
            )),
        }
    }
}

pub struct UpdateServiceUserConsentRequestValidator;

impl UpdateServiceUserConsentRequestValidator {
    pub fn validate(
        content: Option<&UpdateServiceUserConsentRequestContent>,
    ) -> ApiResult<&UpdateServiceUserConsentRequestContent> {
        let content =
            content.ok_or_else(|| ApiError::bad_request("Missing consent data for update"))?;
        if content.consent_version.is_none() {
            return Err(ApiError::bad_request("consentVersion must not be null"));
        }
        if content.status.is_none() {
            return Err(ApiError::bad_request("status must not be null"));
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ConsentStatus;
    use crate::test_utils::test_consent;

    #[test]
    fn test_valid_consent() {
        assert!(ConsentValidator::validate(&test_consent()).is_ok());
    }

    #[test]
    fn test_blank_key_fields() {
        let mut consent = test_consent();
        consent.service_id = "  ".to_string();
        assert_eq!(
            ConsentValidator::validate(&consent),
            Err(ApiError::bad_request("serviceId must not be blank"))
        );

        let mut consent = test_consent();
        consent.user_id = String::new();
        assert_eq!(
            ConsentValidator::validate(&consent),
            Err(ApiError::bad_request("userId must not be blank"))
        );

        let mut consent = test_consent();
        consent.consent_id = "\t".to_string();
        assert_eq!(
            ConsentValidator::validate(&consent),
            Err(ApiError::bad_request("consentId must not be blank"))
        );
    }

    #[test]
    fn test_first_violation_wins() {
        let mut consent = test_consent();
        consent.service_id = String::new();
        consent.consent_id = String::new();
        assert_eq!(
            ConsentValidator::validate(&consent),
            Err(ApiError::bad_request("serviceId must not be blank"))
        );
    }

    #[test]
    fn test_next_consent_version() {
        assert!(ConsentValidator::validate_next_consent_version(1, 2).is_ok());
        assert_eq!(
            ConsentValidator::validate_next_consent_version(1, 1),
            Err(ApiError::conflict(
                "Expected consent version 2, received 1, indicating state conflict"
            ))
        );
        assert_eq!(
            ConsentValidator::validate_next_consent_version(2, 5),
            Err(ApiError::conflict(
                "Expected consent version 3, received 5, indicating state conflict"
            ))
        );
    }

    #[test]
    fn test_next_consent_version_at_max_conflicts() {
        assert_eq!(
            ConsentValidator::validate_next_consent_version(u32::MAX, u32::MAX),
            Err(ApiError::conflict(
                "Expected consent version 4294967296, received 4294967295, indicating state conflict"
            ))
        );
        assert!(ConsentValidator::validate_next_consent_version(u32::MAX - 1, u32::MAX).is_ok());
    }

    #[test]
    fn test_create_request_requires_status() {
        let missing = Err(ApiError::bad_request(
            "Missing required inputs, must provide status",
        ));
        assert_eq!(CreateServiceUserConsentRequestValidator::validate(None), missing);
        assert_eq!(
            CreateServiceUserConsentRequestValidator::validate(Some(
                &CreateServiceUserConsentRequestContent::default()
            )),
            missing
        );

        let content = CreateServiceUserConsentRequestContent {
            status: Some(ConsentStatus::Active),
            ..Default::default()
        };
        assert!(CreateServiceUserConsentRequestValidator::validate(Some(&content)).is_ok());
    }

    #[test]
    fn test_update_request_checks() {
        assert_eq!(
            UpdateServiceUserConsentRequestValidator::validate(None),
            Err(ApiError::bad_request("Missing consent data for update"))
        );

        let mut content = UpdateServiceUserConsentRequestContent::default();
        assert_eq!(
            UpdateServiceUserConsentRequestValidator::validate(Some(&content)),
            Err(ApiError::bad_request("consentVersion must not be null"))
        );

        content.consent_version = Some(2);
        assert_eq!(
            UpdateServiceUserConsentRequestValidator::validate(Some(&content)),
            Err(ApiError::bad_request("status must not be null"))
        );

        content.status = Some(ConsentStatus::Revoked);
        assert!(UpdateServiceUserConsentRequestValidator::validate(Some(&content)).is_ok());
    }
}
