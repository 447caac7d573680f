//! # Consent Management API Router
//!
//! Dispatches proxy requests to operation handlers by resource template and
//! HTTP method.
//!
//! | Resource | Method | Operation |
//! |----------|--------|-----------|
//! | `.../consents` | GET | ListServiceUserConsents |
//! | `.../consents` | POST | CreateServiceUserConsent |
//! | `.../consents/{consentId}` | GET | GetServiceUserConsent |
//! | `.../consents/{consentId}` | POST | UpdateServiceUserConsent |

use crate::domain::constants::api_http_resource;
use crate::handlers::{
    ApiRequestHandler, CreateServiceUserConsentRequestHandler,
    GetServiceUserConsentRequestHandler, ListServiceUserConsentsRequestHandler,
    UpdateServiceUserConsentRequestHandler,
};
use crate::ports::{ConsentManagementApi, ServiceUserConsentRepository};
use crate::service::ConsentManagementService;
use shared_api::handler::build_error_response;
use shared_api::{ApiError, ApiRequest, ApiResponse, HttpMethod};
use std::sync::Arc;
use tracing::{info, warn};

pub struct ConsentManagementApiRouter {
    list: ListServiceUserConsentsRequestHandler,
    create: CreateServiceUserConsentRequestHandler,
    get: GetServiceUserConsentRequestHandler,
    update: UpdateServiceUserConsentRequestHandler,
}

impl ConsentManagementApiRouter {
    pub fn new(api: Arc<dyn ConsentManagementApi>) -> Self {
        Self {
            list: ListServiceUserConsentsRequestHandler::new(api.clone()),
            create: CreateServiceUserConsentRequestHandler::new(api.clone()),
            get: GetServiceUserConsentRequestHandler::new(api.clone()),
            update: UpdateServiceUserConsentRequestHandler::new(api),
        }
    }

    /// Router over a [`ConsentManagementService`] backed by `repository`.
    pub fn with_repository(repository: Arc<dyn ServiceUserConsentRepository>) -> Self {
        Self::new(Arc::new(ConsentManagementService::new(repository)))
    }

    fn resolve(&self, request: &ApiRequest) -> Option<&dyn ApiRequestHandler> {
        let resource = request.resource.as_deref()?;
        let method: HttpMethod = request.http_method.as_deref()?.parse().ok()?;
        match (resource, method) {
            (api_http_resource::SERVICE_USER_CONSENTS, HttpMethod::Get) => Some(&self.list),
            (api_http_resource::SERVICE_USER_CONSENTS, HttpMethod::Post) => Some(&self.create),
            (api_http_resource::SERVICE_USER_CONSENT, HttpMethod::Get) => Some(&self.get),
            (api_http_resource::SERVICE_USER_CONSENT, HttpMethod::Post) => Some(&self.update),
            _ => None,
        }
    }

    pub async fn handle_request(&self, request: Option<ApiRequest>) -> ApiResponse {
        let resource = request.as_ref().and_then(|r| r.resource.clone());
        let method = request.as_ref().and_then(|r| r.http_method.clone());
        info!(
            resource = resource.as_deref().unwrap_or("null"),
            method = method.as_deref().unwrap_or("null"),
            "Received request"
        );

        let handler = request.as_ref().and_then(|r| self.resolve(r));
        match handler {
            Some(handler) => {
                info!(operation = handler.operation(), "Routing request");
                handler.handle_request(request.as_ref()).await
            }
            None => {
                let message = format!(
                    "Unsupported resource operation, received resource '{}' and operation '{}'",
                    resource.as_deref().unwrap_or("null"),
                    method.as_deref().unwrap_or("null")
                );
                warn!(%message, "Unsupported request");
                build_error_response(&ApiError::bad_request(message))
            }
        }
    }
}
