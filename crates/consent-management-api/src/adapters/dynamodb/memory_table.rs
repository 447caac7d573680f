//! In-memory [`ConsentTable`] that evaluates the same write conditions and
//! paginates the service user index in `id` order.

use super::item::{attribute, AttributeValue, Item};
use super::table::{ConsentTable, PutCondition, QueryPage, TableError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Default)]
pub struct InMemoryConsentTable {
    items: RwLock<BTreeMap<String, Item>>,
}

impl InMemoryConsentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn string_attribute<'a>(item: &'a Item, name: &str) -> Option<&'a str> {
    item.get(name).and_then(AttributeValue::as_s)
}

fn index_key(item: &Item) -> Item {
    [attribute::ID, attribute::SERVICE_ID, attribute::USER_ID]
        .into_iter()
        .filter_map(|name| item.get(name).map(|v| (name.to_string(), v.clone())))
        .collect()
}

#[async_trait]
impl ConsentTable for InMemoryConsentTable {
    async fn get_item(&self, id: &str) -> Result<Option<Item>, TableError> {
        Ok(self.items.read().get(id).cloned())
    }

    async fn put_item(&self, item: Item, condition: PutCondition) -> Result<(), TableError> {
        let id = string_attribute(&item, attribute::ID)
            .ok_or_else(|| TableError::Service("item is missing partition key id".into()))?
            .to_string();

        let mut items = self.items.write();
        let existing = items.get(&id);
        let satisfied = match condition {
            PutCondition::IfNotExists => existing.is_none(),
            PutCondition::IfVersion(previous) => existing
                .and_then(|e| e.get(attribute::CONSENT_VERSION))
                .and_then(AttributeValue::as_n)
                .and_then(|n| n.parse::<u32>().ok())
                == Some(previous),
        };
        if !satisfied {
            return Err(TableError::ConditionalCheckFailed(
                "The conditional request failed".into(),
            ));
        }

        items.insert(id, item);
        Ok(())
    }

    async fn query_service_user(
        &self,
        service_id: &str,
        user_id: &str,
        limit: Option<usize>,
        exclusive_start_key: Option<Item>,
    ) -> Result<QueryPage, TableError> {
        let start_after = exclusive_start_key
            .as_ref()
            .map(|key| {
                string_attribute(key, attribute::ID)
                    .map(str::to_string)
                    .ok_or_else(|| TableError::Service("exclusive start key is missing id".into()))
            })
            .transpose()?;

        let items = self.items.read();
        let mut matching = items
            .iter()
            .filter(|(id, _)| start_after.as_deref().map_or(true, |start| id.as_str() > start))
            .map(|(_, item)| item)
            .filter(|item| {
                string_attribute(item, attribute::SERVICE_ID) == Some(service_id)
                    && string_attribute(item, attribute::USER_ID) == Some(user_id)
            })
            .peekable();

        let limit = limit.unwrap_or(usize::MAX);
        let mut page = Vec::new();
        while page.len() < limit {
            match matching.next() {
                Some(item) => page.push(item.clone()),
                None => break,
            }
        }

        let last_evaluated_key = match (matching.peek(), page.last()) {
            (Some(_), Some(last)) => Some(index_key(last)),
            _ => None,
        };

        Ok(QueryPage {
            items: page,
            last_evaluated_key,
        })
    }
}
