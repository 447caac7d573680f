//! # In-Memory Consent Repository
//!
//! Keeps consents in a map keyed by consent key, plus a per service-user index
//! in insertion order used for listing. Page tokens are decimal indexes into
//! that index.

use crate::domain::{Consent, ConsentValidator, ServiceUserConsentKey, ServiceUserKey};
use crate::ports::outbound::{consent_not_found, ServiceUserConsentRepository};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_api::{ApiError, ApiResult, ListPage, ListPaginator};
use std::collections::HashMap;

#[derive(Default)]
struct Store {
    consents: HashMap<ServiceUserConsentKey, Consent>,
    /// Consent keys per service user, in creation order.
    by_service_user: HashMap<ServiceUserKey, Vec<ServiceUserConsentKey>>,
}

#[derive(Default)]
pub struct InMemoryServiceUserConsentRepository {
    store: RwLock<Store>,
}

impl InMemoryServiceUserConsentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored consents.
    pub fn len(&self) -> usize {
        self.store.read().consents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_page_token(page_token: Option<&str>) -> ApiResult<Option<i64>> {
    page_token
        .map(|token| {
            token.parse::<i64>().map_err(|_| {
                ApiError::bad_request(format!(
                    "Received invalid pagination token {token}, expected an integer value"
                ))
            })
        })
        .transpose()
}

#[async_trait]
impl ServiceUserConsentRepository for InMemoryServiceUserConsentRepository {
    async fn create_service_user_consent(&self, consent: Consent) -> ApiResult<()> {
        ConsentValidator::validate(&consent)?;
        let key = consent.key();

        let mut store = self.store.write();
        if store.consents.contains_key(&key) {
            return Err(ApiError::conflict(format!("Consent already exists with {key}")));
        }

        store
            .by_service_user
            .entry(key.service_user_key())
            .or_default()
            .push(key.clone());
        store.consents.insert(key, consent);
        Ok(())
    }

    async fn get_service_user_consent(&self, key: &ServiceUserConsentKey) -> ApiResult<Consent> {
        self.store
            .read()
            .consents
            .get(key)
            .cloned()
            .ok_or_else(|| consent_not_found(key))
    }

    async fn update_service_user_consent(&self, consent: Consent) -> ApiResult<()> {
        ConsentValidator::validate(&consent)?;
        let key = consent.key();

        let mut store = self.store.write();
        let existing = store
            .consents
            .get_mut(&key)
            .ok_or_else(|| consent_not_found(&key))?;
        ConsentValidator::validate_next_consent_version(
            existing.consent_version,
            consent.consent_version,
        )?;

        // The listing index holds keys, so replacing the value keeps its position.
        *existing = consent;
        Ok(())
    }

    async fn list_service_user_consents(
        &self,
        key: &ServiceUserKey,
        limit: Option<usize>,
        page_token: Option<&str>,
    ) -> ApiResult<ListPage<Consent>> {
        let start = match parse_page_token(page_token)? {
            Some(token) => match usize::try_from(token) {
                Ok(start) => Some(start),
                // Negative indexes are out of bounds.
                Err(_) => return Ok(ListPage::empty()),
            },
            None => None,
        };

        let store = self.store.read();
        let all: Vec<Consent> = store
            .by_service_user
            .get(key)
            .map(|keys| {
                keys.iter()
                    .filter_map(|k| store.consents.get(k).cloned())
                    .collect()
            })
            .unwrap_or_default();

        Ok(ListPaginator::get_single_page(&all, limit, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConsentStatus;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_then_get() {
        let repository = InMemoryServiceUserConsentRepository::new();
        repository
            .create_service_user_consent(test_consent())
            .await
            .unwrap();

        let stored = repository
            .get_service_user_consent(&test_consent_key())
            .await
            .unwrap();
        assert_eq!(stored, test_consent());
        assert_eq!(repository.len(), 1);
    }

    #[test]
    fn test_len_tracks_creates() {
        let repository = InMemoryServiceUserConsentRepository::new();
        assert!(repository.is_empty());
        for consent in test_consents(3) {
            tokio_test::block_on(repository.create_service_user_consent(consent)).unwrap();
        }
        assert_eq!(repository.len(), 3);
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts() {
        let repository = InMemoryServiceUserConsentRepository::new();
        repository
            .create_service_user_consent(test_consent())
            .await
            .unwrap();

        let result = repository.create_service_user_consent(test_consent()).await;
        assert_eq!(
            result,
            Err(ApiError::conflict(
                "Consent already exists with serviceId TestServiceId, userId TestUserId, consentId TestConsentId"
            ))
        );
    }

    #[tokio::test]
    async fn test_create_invalid_consent() {
        let repository = InMemoryServiceUserConsentRepository::new();
        let mut consent = test_consent();
        consent.user_id = " ".to_string();

        let result = repository.create_service_user_consent(consent).await;
        assert_eq!(result, Err(ApiError::bad_request("userId must not be blank")));
        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing() {
        let repository = InMemoryServiceUserConsentRepository::new();
        let result = repository.get_service_user_consent(&test_consent_key()).await;
        assert_eq!(
            result,
            Err(ApiError::not_found(
                "No consent found with serviceId TestServiceId, userId TestUserId, consentId TestConsentId"
            ))
        );
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let repository = InMemoryServiceUserConsentRepository::new();
        for consent in test_consents(3) {
            repository.create_service_user_consent(consent).await.unwrap();
        }

        let middle = test_consents(3).remove(1);
        let updated = next_version(&middle, ConsentStatus::Revoked);
        repository
            .update_service_user_consent(updated.clone())
            .await
            .unwrap();

        let page = repository
            .list_service_user_consents(&test_service_user_key(), None, None)
            .await
            .unwrap();
        assert_eq!(page.results_on_page.len(), 3);
        assert_eq!(page.results_on_page[1], updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repository = InMemoryServiceUserConsentRepository::new();
        let result = repository
            .update_service_user_consent(next_version(&test_consent(), ConsentStatus::Expired))
            .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_version_conflict() {
        let repository = InMemoryServiceUserConsentRepository::new();
        repository
            .create_service_user_consent(test_consent())
            .await
            .unwrap();

        let mut stale = test_consent();
        stale.consent_version = 3;
        let result = repository.update_service_user_consent(stale).await;
        assert_eq!(
            result,
            Err(ApiError::conflict(
                "Expected consent version 2, received 3, indicating state conflict"
            ))
        );
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let repository = InMemoryServiceUserConsentRepository::new();
        let consents = test_consents(4);
        for consent in consents.clone() {
            repository.create_service_user_consent(consent).await.unwrap();
        }

        let page = repository
            .list_service_user_consents(&test_service_user_key(), Some(2), Some("1"))
            .await
            .unwrap();
        assert_eq!(page.results_on_page, consents[1..3].to_vec());
        assert_eq!(page.next_page_token.as_deref(), Some("3"));

        let page = repository
            .list_service_user_consents(&test_service_user_key(), Some(2), Some("3"))
            .await
            .unwrap();
        assert_eq!(page.results_on_page, consents[3..].to_vec());
        assert!(page.next_page_token.is_none());
    }

    #[tokio::test]
    async fn test_list_unknown_service_user_is_empty() {
        let repository = InMemoryServiceUserConsentRepository::new();
        let page = repository
            .list_service_user_consents(&ServiceUserKey::new("other", "user"), Some(5), None)
            .await
            .unwrap();
        assert_eq!(page, ListPage::empty());
    }

    #[tokio::test]
    async fn test_list_negative_token_is_empty_page() {
        let repository = InMemoryServiceUserConsentRepository::new();
        for consent in test_consents(2) {
            repository.create_service_user_consent(consent).await.unwrap();
        }

        let page = repository
            .list_service_user_consents(&test_service_user_key(), None, Some("-1"))
            .await
            .unwrap();
        assert_eq!(page, ListPage::empty());
    }

    #[tokio::test]
    async fn test_list_token_past_end_is_empty_page() {
        let repository = InMemoryServiceUserConsentRepository::new();
        for consent in test_consents(2) {
            repository.create_service_user_consent(consent).await.unwrap();
        }

        let page = repository
            .list_service_user_consents(&test_service_user_key(), Some(1), Some("2"))
            .await
            .unwrap();
        assert_eq!(page, ListPage::empty());
    }

    #[tokio::test]
    async fn test_list_invalid_token() {
        let repository = InMemoryServiceUserConsentRepository::new();
        let result = repository
            .list_service_user_consents(&test_service_user_key(), None, Some("abc"))
            .await;
        assert_eq!(
            result,
            Err(ApiError::bad_request(
                "Received invalid pagination token abc, expected an integer value"
            ))
        );
    }
}
