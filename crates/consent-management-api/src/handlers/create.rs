use super::{parse_service_user_key, ApiRequestHandler};
use crate::domain::constants::operation::CREATE_SERVICE_USER_CONSENT;
use crate::domain::{CreateServiceUserConsentRequestContent, CreateServiceUserConsentResponseContent};
use crate::ports::ConsentManagementApi;
use async_trait::async_trait;
use shared_api::handler::{into_response, parse_body};
use shared_api::{ApiRequest, ApiResponse, ApiResult};
use std::sync::Arc;
use tracing::info;

pub struct CreateServiceUserConsentRequestHandler {
    api: Arc<dyn ConsentManagementApi>,
}

impl CreateServiceUserConsentRequestHandler {
    pub fn new(api: Arc<dyn ConsentManagementApi>) -> Self {
        Self { api }
    }

    async fn handle(
        &self,
        request: Option<&ApiRequest>,
    ) -> ApiResult<Option<CreateServiceUserConsentResponseContent>> {
        let key = parse_service_user_key(request)?;
        let content: Option<CreateServiceUserConsentRequestContent> =
            parse_body(request, CREATE_SERVICE_USER_CONSENT)?;

        info!(service_id = %key.service_id, user_id = %key.user_id, "Creating consent");
        let response = self.api.create_service_user_consent(&key, content).await?;
        info!(
            service_id = %key.service_id,
            user_id = %key.user_id,
            consent_id = %response.consent_id,
            "Successfully created consent"
        );
        Ok(Some(response))
    }
}

#[async_trait]
impl ApiRequestHandler for CreateServiceUserConsentRequestHandler {
    fn operation(&self) -> &'static str {
        CREATE_SERVICE_USER_CONSENT
    }

    async fn handle_request(&self, request: Option<&ApiRequest>) -> ApiResponse {
        into_response(CREATE_SERVICE_USER_CONSENT, self.handle(request).await)
    }
}
