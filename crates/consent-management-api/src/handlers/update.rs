use super::{parse_service_user_consent_key, ApiRequestHandler};
use crate::domain::constants::operation::UPDATE_SERVICE_USER_CONSENT;
use crate::domain::UpdateServiceUserConsentRequestContent;
use crate::ports::ConsentManagementApi;
use async_trait::async_trait;
use shared_api::handler::{into_response, parse_body};
use shared_api::{ApiRequest, ApiResponse, ApiResult};
use std::sync::Arc;
use tracing::info;

pub struct UpdateServiceUserConsentRequestHandler {
    api: Arc<dyn ConsentManagementApi>,
}

impl UpdateServiceUserConsentRequestHandler {
    pub fn new(api: Arc<dyn ConsentManagementApi>) -> Self {
        Self { api }
    }

    async fn handle(&self, request: Option<&ApiRequest>) -> ApiResult<Option<()>> {
        let key = parse_service_user_consent_key(request)?;
        let content: Option<UpdateServiceUserConsentRequestContent> =
            parse_body(request, UPDATE_SERVICE_USER_CONSENT)?;

        info!(
            service_id = %key.service_id,
            user_id = %key.user_id,
            consent_id = %key.consent_id,
            consent_version = content.as_ref().and_then(|c| c.consent_version),
            "Updating consent"
        );
        self.api.update_service_user_consent(&key, content).await?;
        // Successful updates carry no body.
        Ok(None)
    }
}

#[async_trait]
impl ApiRequestHandler for UpdateServiceUserConsentRequestHandler {
    fn operation(&self) -> &'static str {
        UPDATE_SERVICE_USER_CONSENT
    }

    async fn handle_request(&self, request: Option<&ApiRequest>) -> ApiResponse {
        into_response(UPDATE_SERVICE_USER_CONSENT, self.handle(request).await)
    }
}
