//! # Consent Table Port
//!
//! The DynamoDB operations the repository needs. Implemented by the AWS SDK
//! adapter in production and by an in-memory table for tests and local runs.

use super::item::Item;
use async_trait::async_trait;

/// Write precondition for [`ConsentTable::put_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutCondition {
    /// `attribute_not_exists(id)`
    IfNotExists,
    /// `attribute_exists(id) AND consentVersion = :previousVersion`
    IfVersion(u32),
}

/// One page of a service user query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPage {
    pub items: Vec<Item>,
    pub last_evaluated_key: Option<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("conditional check failed: {0}")]
    ConditionalCheckFailed(String),
    #[error("{0}")]
    Service(String),
}

#[async_trait]
pub trait ConsentTable: Send + Sync {
    /// Strongly consistent read of the item with partition key `id`.
    async fn get_item(&self, id: &str) -> Result<Option<Item>, TableError>;

    async fn put_item(&self, item: Item, condition: PutCondition) -> Result<(), TableError>;

    /// Query the service user index.
    async fn query_service_user(
        &self,
        service_id: &str,
        user_id: &str,
        limit: Option<usize>,
        exclusive_start_key: Option<Item>,
    ) -> Result<QueryPage, TableError>;
}
