//! # Request Handlers
//!
//! One handler per API operation. A handler extracts path, query and body
//! inputs from the proxy request, calls the consent API and renders the
//! proxy response.

mod create;
mod get;
mod list;
mod update;

pub use create::CreateServiceUserConsentRequestHandler;
pub use get::GetServiceUserConsentRequestHandler;
pub use list::ListServiceUserConsentsRequestHandler;
pub use update::UpdateServiceUserConsentRequestHandler;

use crate::domain::constants::path_parameter;
use crate::domain::{ServiceUserConsentKey, ServiceUserKey};
use async_trait::async_trait;
use shared_api::handler::check_required_path_parameters;
use shared_api::parsers::parse_path_parameter;
use shared_api::{ApiRequest, ApiResponse, ApiResult};

#[async_trait]
pub trait ApiRequestHandler: Send + Sync {
    /// Operation name used in logs.
    fn operation(&self) -> &'static str;

    /// Handle a request. Failures are rendered as error responses, never returned.
    async fn handle_request(&self, request: Option<&ApiRequest>) -> ApiResponse;
}

pub(crate) fn parse_service_user_key(request: Option<&ApiRequest>) -> ApiResult<ServiceUserKey> {
    check_required_path_parameters(request, &path_parameter::SERVICE_USER)?;
    Ok(ServiceUserKey::new(
        parse_path_parameter(request, path_parameter::SERVICE_ID)?,
        parse_path_parameter(request, path_parameter::USER_ID)?,
    ))
}

pub(crate) fn parse_service_user_consent_key(
    request: Option<&ApiRequest>,
) -> ApiResult<ServiceUserConsentKey> {
    check_required_path_parameters(request, &path_parameter::SERVICE_USER_CONSENT)?;
    Ok(ServiceUserConsentKey::new(
        parse_path_parameter(request, path_parameter::SERVICE_ID)?,
        parse_path_parameter(request, path_parameter::USER_ID)?,
        parse_path_parameter(request, path_parameter::CONSENT_ID)?,
    ))
}
