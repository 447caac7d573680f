use super::{parse_service_user_consent_key, ApiRequestHandler};
use crate::domain::constants::operation::GET_SERVICE_USER_CONSENT;
use crate::domain::GetServiceUserConsentResponseContent;
use crate::ports::ConsentManagementApi;
use async_trait::async_trait;
use shared_api::handler::into_response;
use shared_api::{ApiRequest, ApiResponse, ApiResult};
use std::sync::Arc;
use tracing::info;

pub struct GetServiceUserConsentRequestHandler {
    api: Arc<dyn ConsentManagementApi>,
}

impl GetServiceUserConsentRequestHandler {
    pub fn new(api: Arc<dyn ConsentManagementApi>) -> Self {
        Self { api }
    }

    async fn handle(
        &self,
        request: Option<&ApiRequest>,
    ) -> ApiResult<Option<GetServiceUserConsentResponseContent>> {
        let key = parse_service_user_consent_key(request)?;
        info!(
            path = request.and_then(|r| r.path.as_deref()).unwrap_or_default(),
            "Retrieving consent for path"
        );
        self.api.get_service_user_consent(&key).await.map(Some)
    }
}

#[async_trait]
impl ApiRequestHandler for GetServiceUserConsentRequestHandler {
    fn operation(&self) -> &'static str {
        GET_SERVICE_USER_CONSENT
    }

    async fn handle_request(&self, request: Option<&ApiRequest>) -> ApiResponse {
        into_response(GET_SERVICE_USER_CONSENT, self.handle(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::{consent_request, seeded_service};
    use crate::test_utils::test_consent;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_existing() {
        let handler =
            GetServiceUserConsentRequestHandler::new(seeded_service(vec![test_consent()]).await);
        let response = handler.handle_request(Some(&consent_request("GET"))).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body_json(),
            Some(json!({ "data": serde_json::to_value(test_consent()).unwrap() }))
        );
    }

    #[tokio::test]
    async fn test_get_missing() {
        let handler = GetServiceUserConsentRequestHandler::new(seeded_service(vec![]).await);
        let response = handler.handle_request(Some(&consent_request("GET"))).await;

        assert_eq!(response.status_code, 404);
        assert_eq!(
            response.body_json(),
            Some(json!({
                "message": "No consent found with serviceId TestServiceId, userId TestUserId, consentId TestConsentId"
            }))
        );
    }
}
