//! # Outbound Ports (Driven Ports)
//!
//! Persistence the consent service requires from its host.

use crate::domain::{Consent, ServiceUserConsentKey, ServiceUserKey};
use async_trait::async_trait;
use shared_api::{ApiError, ApiResult, ListPage};

/// Storage for service user consents.
///
/// Production: `DynamoDbServiceUserConsentRepository`
/// Testing and local runs: `InMemoryServiceUserConsentRepository`
#[async_trait]
pub trait ServiceUserConsentRepository: Send + Sync {
    /// Store a new consent.
    ///
    /// ## Errors
    ///
    /// - `BadRequest`: the consent fails validation
    /// - `Conflict`: a consent with the same key already exists
    async fn create_service_user_consent(&self, consent: Consent) -> ApiResult<()>;

    /// Fetch a single consent.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no consent is stored under the key
    async fn get_service_user_consent(&self, key: &ServiceUserConsentKey) -> ApiResult<Consent>;

    /// Replace a stored consent with its next version.
    ///
    /// ## Errors
    ///
    /// - `BadRequest`: the consent fails validation
    /// - `NotFound`: no consent is stored under the key
    /// - `Conflict`: `consent.consent_version` is not the stored version plus one
    async fn update_service_user_consent(&self, consent: Consent) -> ApiResult<()>;

    /// List one page of a user's consents for a service.
    ///
    /// Page tokens are opaque and only meaningful to the repository that issued them.
    ///
    /// ## Errors
    ///
    /// - `BadRequest`: the page token cannot be decoded
    async fn list_service_user_consents(
        &self,
        key: &ServiceUserKey,
        limit: Option<usize>,
        page_token: Option<&str>,
    ) -> ApiResult<ListPage<Consent>>;
}

/// Message for a missing consent, shared by every repository.
pub fn consent_not_found(key: &ServiceUserConsentKey) -> ApiError {
    ApiError::not_found(format!("No consent found with {key}"))
}
