//! # Inbound Ports (Driving Ports)
//!
//! The operations the consent API exposes to request handlers.

use crate::domain::{
    CreateServiceUserConsentRequestContent, CreateServiceUserConsentResponseContent,
    GetServiceUserConsentResponseContent, ListServiceUserConsentResponseContent,
    ServiceUserConsentKey, ServiceUserKey, UpdateServiceUserConsentRequestContent,
};
use async_trait::async_trait;
use shared_api::ApiResult;

#[async_trait]
pub trait ConsentManagementApi: Send + Sync {
    /// Create version 1 of a new consent and return its generated id.
    async fn create_service_user_consent(
        &self,
        key: &ServiceUserKey,
        content: Option<CreateServiceUserConsentRequestContent>,
    ) -> ApiResult<CreateServiceUserConsentResponseContent>;

    async fn get_service_user_consent(
        &self,
        key: &ServiceUserConsentKey,
    ) -> ApiResult<GetServiceUserConsentResponseContent>;

    /// `limit` must be at least 1 when given.
    async fn list_service_user_consents(
        &self,
        key: &ServiceUserKey,
        limit: Option<i64>,
        page_token: Option<String>,
    ) -> ApiResult<ListServiceUserConsentResponseContent>;

    /// Replace a consent with the next version described by `content`.
    async fn update_service_user_consent(
        &self,
        key: &ServiceUserConsentKey,
        content: Option<UpdateServiceUserConsentRequestContent>,
    ) -> ApiResult<()>;
}
