use super::{parse_service_user_key, ApiRequestHandler};
use crate::domain::constants::operation::LIST_SERVICE_USER_CONSENTS;
use crate::domain::constants::query_parameter;
use crate::domain::ListServiceUserConsentResponseContent;
use crate::ports::ConsentManagementApi;
use async_trait::async_trait;
use shared_api::handler::into_response;
use shared_api::parsers::{parse_int_query_parameter, parse_string_query_parameter};
use shared_api::{ApiRequest, ApiResponse, ApiResult};
use std::sync::Arc;
use tracing::info;

pub struct ListServiceUserConsentsRequestHandler {
    api: Arc<dyn ConsentManagementApi>,
}

impl ListServiceUserConsentsRequestHandler {
    pub fn new(api: Arc<dyn ConsentManagementApi>) -> Self {
        Self { api }
    }

    async fn handle(
        &self,
        request: Option<&ApiRequest>,
    ) -> ApiResult<Option<ListServiceUserConsentResponseContent>> {
        let key = parse_service_user_key(request)?;
        let limit = parse_int_query_parameter(request, query_parameter::LIMIT)?;
        let page_token = parse_string_query_parameter(request, query_parameter::PAGE_TOKEN)?;

        info!(
            path = request.and_then(|r| r.path.as_deref()).unwrap_or_default(),
            limit,
            "Retrieving consents for path"
        );
        self.api
            .list_service_user_consents(&key, limit, page_token)
            .await
            .map(Some)
    }
}

#[async_trait]
impl ApiRequestHandler for ListServiceUserConsentsRequestHandler {
    fn operation(&self) -> &'static str {
        LIST_SERVICE_USER_CONSENTS
    }

    async fn handle_request(&self, request: Option<&ApiRequest>) -> ApiResponse {
        into_response(LIST_SERVICE_USER_CONSENTS, self.handle(request).await)
    }
}
