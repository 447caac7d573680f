//! # DynamoDB Consent Repository
//!
//! Stores one item per consent in a table partitioned by
//! `serviceId|userId|consentId`. Listing queries a global secondary index on
//! `serviceId` (partition) and `userId` (sort). Versioning is enforced with
//! conditional writes, so concurrent updates of the same version race safely.

use super::item::consent_item_id;
use super::mappers::{ConsentMapper, PageTokenMapper};
use super::table::{ConsentTable, PutCondition, TableError};
use crate::domain::{Consent, ConsentValidator, ServiceUserConsentKey, ServiceUserKey};
use crate::ports::outbound::{consent_not_found, ServiceUserConsentRepository};
use async_trait::async_trait;
use shared_api::{ApiError, ApiResult, ListPage};
use std::sync::Arc;
use tracing::{debug, error};

pub struct DynamoDbServiceUserConsentRepository {
    table: Arc<dyn ConsentTable>,
}

impl DynamoDbServiceUserConsentRepository {
    pub fn new(table: Arc<dyn ConsentTable>) -> Self {
        Self { table }
    }
}

fn key_description(key: &ServiceUserConsentKey) -> String {
    format!(
        "serviceId: '{}', userId: '{}', consentId: '{}'",
        key.service_id, key.user_id, key.consent_id
    )
}

fn service_failure(action: &str, subject: String, err: &TableError) -> ApiError {
    error!(action, error = %err, "DynamoDB request failed");
    ApiError::internal(format!(
        "Received DynamoDbException {action} {subject}: {err}"
    ))
}

impl DynamoDbServiceUserConsentRepository {
    async fn load(&self, key: &ServiceUserConsentKey) -> ApiResult<Option<Consent>> {
        let item = self
            .table
            .get_item(&consent_item_id(key))
            .await
            .map_err(|e| {
                service_failure(
                    "retrieving",
                    format!("consent with {}", key_description(key)),
                    &e,
                )
            })?;
        item.as_ref().map(ConsentMapper::item_to_consent).transpose()
    }

    /// Explain a rejected versioned write by re-reading the stored consent.
    async fn update_rejection(&self, consent: &Consent) -> ApiError {
        let key = consent.key();
        match self.load(&key).await {
            Ok(None) => consent_not_found(&key),
            Ok(Some(existing)) => ConsentValidator::validate_next_consent_version(
                existing.consent_version,
                consent.consent_version,
            )
            .err()
            // The stored version moved on between the write and the read.
            .unwrap_or_else(|| {
                ApiError::conflict(format!(
                    "Consent with {} was modified concurrently",
                    key_description(&key)
                ))
            }),
            Err(err) => err,
        }
    }
}

#[async_trait]
impl ServiceUserConsentRepository for DynamoDbServiceUserConsentRepository {
    async fn create_service_user_consent(&self, consent: Consent) -> ApiResult<()> {
        ConsentValidator::validate(&consent)?;
        let key = consent.key();
        let item = ConsentMapper::consent_to_item(&consent);

        match self.table.put_item(item, PutCondition::IfNotExists).await {
            Ok(()) => {
                debug!(consent_id = %key.consent_id, "Stored consent item");
                Ok(())
            }
            Err(TableError::ConditionalCheckFailed(_)) => Err(ApiError::conflict(format!(
                "Error creating consent with {}, consent already exists",
                key_description(&key)
            ))),
            Err(err) => Err(service_failure(
                "creating",
                format!("consent with {}", key_description(&key)),
                &err,
            )),
        }
    }

    async fn get_service_user_consent(&self, key: &ServiceUserConsentKey) -> ApiResult<Consent> {
        self.load(key).await?.ok_or_else(|| consent_not_found(key))
    }

    async fn update_service_user_consent(&self, consent: Consent) -> ApiResult<()> {
        ConsentValidator::validate(&consent)?;
        let Some(previous_version) = consent.consent_version.checked_sub(1) else {
            return Err(self.update_rejection(&consent).await);
        };
        let item = ConsentMapper::consent_to_item(&consent);

        match self
            .table
            .put_item(item, PutCondition::IfVersion(previous_version))
            .await
        {
            Ok(()) => Ok(()),
            Err(TableError::ConditionalCheckFailed(_)) => Err(self.update_rejection(&consent).await),
            Err(err) => Err(service_failure(
                "updating",
                format!("consent with {}", key_description(&consent.key())),
                &err,
            )),
        }
    }

    async fn list_service_user_consents(
        &self,
        key: &ServiceUserKey,
        limit: Option<usize>,
        page_token: Option<&str>,
    ) -> ApiResult<ListPage<Consent>> {
        let exclusive_start_key = PageTokenMapper::to_exclusive_start_key(page_token)?;

        let page = self
            .table
            .query_service_user(&key.service_id, &key.user_id, limit, exclusive_start_key)
            .await
            .map_err(|e| {
                service_failure(
                    "listing",
                    format!(
                        "consents with serviceId: '{}', userId: '{}'",
                        key.service_id, key.user_id
                    ),
                    &e,
                )
            })?;

        if page.items.is_empty() {
            return Ok(ListPage::empty());
        }

        let consents = page
            .items
            .iter()
            .map(ConsentMapper::item_to_consent)
            .collect::<ApiResult<Vec<_>>>()?;
        let next_page_token = PageTokenMapper::to_page_token(page.last_evaluated_key.as_ref())?;

        Ok(ListPage::new(consents, next_page_token))
    }
}
