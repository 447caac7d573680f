//! # Consent Management Service
//!
//! Implements the inbound API on top of a consent repository.

use crate::domain::constants::{query_parameter, INITIAL_CONSENT_VERSION};
use crate::domain::{
    Consent, CreateServiceUserConsentRequestContent, CreateServiceUserConsentRequestValidator,
    CreateServiceUserConsentResponseContent, GetServiceUserConsentResponseContent,
    ListServiceUserConsentResponseContent, ServiceUserConsentKey, ServiceUserKey,
    UpdateServiceUserConsentRequestContent, UpdateServiceUserConsentRequestValidator,
};
use crate::ports::{ConsentManagementApi, ServiceUserConsentRepository};
use async_trait::async_trait;
use shared_api::{ApiError, ApiResult};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

pub struct ConsentManagementService {
    repository: Arc<dyn ServiceUserConsentRepository>,
}

impl ConsentManagementService {
    pub fn new(repository: Arc<dyn ServiceUserConsentRepository>) -> Self {
        Self { repository }
    }
}

fn parse_limit(limit: Option<i64>) -> ApiResult<Option<usize>> {
    match limit {
        None => Ok(None),
        Some(limit) if limit >= 1 => usize::try_from(limit).map(Some).map_err(|_| invalid_limit()),
        Some(_) => Err(invalid_limit()),
    }
}

fn invalid_limit() -> ApiError {
    ApiError::bad_request(format!(
        "Unable to parse {} query parameter from request",
        query_parameter::LIMIT
    ))
}

#[async_trait]
impl ConsentManagementApi for ConsentManagementService {
    async fn create_service_user_consent(
        &self,
        key: &ServiceUserKey,
        content: Option<CreateServiceUserConsentRequestContent>,
    ) -> ApiResult<CreateServiceUserConsentResponseContent> {
        let content = CreateServiceUserConsentRequestValidator::validate(content.as_ref())?;
        let status = content
            .status
            .ok_or_else(|| ApiError::bad_request("Missing required inputs, must provide status"))?;

        let consent = Consent {
            service_id: key.service_id.clone(),
            user_id: key.user_id.clone(),
            consent_id: Uuid::new_v4().to_string(),
            consent_version: INITIAL_CONSENT_VERSION,
            status,
            consent_type: content.consent_type.clone(),
            consent_data: content.consent_data.clone(),
            expiry_time: content.expiry_time,
        };
        let consent_id = consent.consent_id.clone();

        debug!(consent_id = %consent_id, "Generated consent id");
        self.repository.create_service_user_consent(consent).await?;

        Ok(CreateServiceUserConsentResponseContent { consent_id })
    }

    async fn get_service_user_consent(
        &self,
        key: &ServiceUserConsentKey,
    ) -> ApiResult<GetServiceUserConsentResponseContent> {
        let data = self.repository.get_service_user_consent(key).await?;
        Ok(GetServiceUserConsentResponseContent { data })
    }

    async fn list_service_user_consents(
        &self,
        key: &ServiceUserKey,
        limit: Option<i64>,
        page_token: Option<String>,
    ) -> ApiResult<ListServiceUserConsentResponseContent> {
        let limit = parse_limit(limit)?;
        let page = self
            .repository
            .list_service_user_consents(key, limit, page_token.as_deref())
            .await?;

        info!(
            service_id = %key.service_id,
            user_id = %key.user_id,
            count = page.results_on_page.len(),
            has_next_page = page.next_page_token.is_some(),
            "Listed consents"
        );

        Ok(ListServiceUserConsentResponseContent {
            data: page.results_on_page,
            next_page_token: page.next_page_token,
        })
    }

    async fn update_service_user_consent(
        &self,
        key: &ServiceUserConsentKey,
        content: Option<UpdateServiceUserConsentRequestContent>,
    ) -> ApiResult<()> {
        let content = UpdateServiceUserConsentRequestValidator::validate(content.as_ref())?;
        let (Some(consent_version), Some(status)) = (content.consent_version, content.status)
        else {
            return Err(ApiError::bad_request("Missing consent data for update"));
        };

        let consent = Consent {
            service_id: key.service_id.clone(),
            user_id: key.user_id.clone(),
            consent_id: key.consent_id.clone(),
            consent_version,
            status,
            consent_type: content.consent_type.clone(),
            consent_data: content.consent_data.clone(),
            expiry_time: content.expiry_time,
        };

        self.repository.update_service_user_consent(consent).await
    }
}
