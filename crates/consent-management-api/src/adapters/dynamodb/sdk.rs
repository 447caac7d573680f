//! [`ConsentTable`] backed by the AWS SDK DynamoDB client.

use super::item::{attribute, AttributeValue, Item};
use super::table::{ConsentTable, PutCondition, QueryPage, TableError};
use crate::config::DynamoDbConfig;
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue as SdkAttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use tracing::{debug, info};

const CREATE_CONDITION: &str = "attribute_not_exists(id)";
const UPDATE_CONDITION: &str = "attribute_exists(id) AND consentVersion = :previousVersion";
const PREVIOUS_VERSION: &str = ":previousVersion";
const SERVICE_USER_KEY_CONDITION: &str = "#serviceId = :serviceId AND #userId = :userId";

pub struct AwsSdkConsentTable {
    client: Client,
    table_name: String,
    service_user_index_name: String,
}

impl AwsSdkConsentTable {
    pub fn new(client: Client, config: &DynamoDbConfig) -> Self {
        Self {
            client,
            table_name: config.table_name.clone(),
            service_user_index_name: config.service_user_index_name.clone(),
        }
    }

    /// Build a client from the default AWS credential and region chain.
    pub async fn from_env(config: &DynamoDbConfig) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &config.endpoint_url {
            info!(endpoint_url = %endpoint_url, "Using custom DynamoDB endpoint");
            builder = builder.endpoint_url(endpoint_url);
        }
        info!(
            table = %config.table_name,
            index = %config.service_user_index_name,
            "Created DynamoDB client"
        );
        Self::new(Client::from_conf(builder.build()), config)
    }
}

fn to_sdk(value: AttributeValue) -> SdkAttributeValue {
    match value {
        AttributeValue::S(s) => SdkAttributeValue::S(s),
        AttributeValue::N(n) => SdkAttributeValue::N(n),
        AttributeValue::Bool(b) => SdkAttributeValue::Bool(b),
        AttributeValue::M(m) => SdkAttributeValue::M(to_sdk_item(m)),
        AttributeValue::Null => SdkAttributeValue::Null(true),
    }
}

fn to_sdk_item(item: Item) -> HashMap<String, SdkAttributeValue> {
    item.into_iter().map(|(k, v)| (k, to_sdk(v))).collect()
}

fn from_sdk(value: &SdkAttributeValue) -> Result<AttributeValue, TableError> {
    match value {
        SdkAttributeValue::S(s) => Ok(AttributeValue::S(s.clone())),
        SdkAttributeValue::N(n) => Ok(AttributeValue::N(n.clone())),
        SdkAttributeValue::Bool(b) => Ok(AttributeValue::Bool(*b)),
        SdkAttributeValue::M(m) => from_sdk_item(m).map(AttributeValue::M),
        SdkAttributeValue::Null(_) => Ok(AttributeValue::Null),
        other => Err(TableError::Service(format!(
            "unsupported attribute value {other:?}"
        ))),
    }
}

fn from_sdk_item(item: &HashMap<String, SdkAttributeValue>) -> Result<Item, TableError> {
    item.iter()
        .map(|(k, v)| from_sdk(v).map(|v| (k.clone(), v)))
        .collect()
}

#[async_trait]
impl ConsentTable for AwsSdkConsentTable {
    async fn get_item(&self, id: &str) -> Result<Option<Item>, TableError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(attribute::ID, SdkAttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| TableError::Service(DisplayErrorContext(&e).to_string()))?;

        output.item().map(from_sdk_item).transpose()
    }

    async fn put_item(&self, item: Item, condition: PutCondition) -> Result<(), TableError> {
        let request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_sdk_item(item)));
        let request = match condition {
            PutCondition::IfNotExists => request.condition_expression(CREATE_CONDITION),
            PutCondition::IfVersion(previous) => request
                .condition_expression(UPDATE_CONDITION)
                .expression_attribute_values(
                    PREVIOUS_VERSION,
                    SdkAttributeValue::N(previous.to_string()),
                ),
        };

        match request.send().await {
            Ok(_) => Ok(()),
            Err(err) => {
                let service_error = err.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    debug!(?condition, "Conditional put rejected");
                    Err(TableError::ConditionalCheckFailed(service_error.to_string()))
                } else {
                    Err(TableError::Service(
                        DisplayErrorContext(&service_error).to_string(),
                    ))
                }
            }
        }
    }

    async fn query_service_user(
        &self,
        service_id: &str,
        user_id: &str,
        limit: Option<usize>,
        exclusive_start_key: Option<Item>,
    ) -> Result<QueryPage, TableError> {
        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.service_user_index_name)
            .key_condition_expression(SERVICE_USER_KEY_CONDITION)
            .expression_attribute_names("#serviceId", attribute::SERVICE_ID)
            .expression_attribute_names("#userId", attribute::USER_ID)
            .expression_attribute_values(":serviceId", SdkAttributeValue::S(service_id.to_string()))
            .expression_attribute_values(":userId", SdkAttributeValue::S(user_id.to_string()))
            .set_limit(limit.map(|l| i32::try_from(l).unwrap_or(i32::MAX)))
            .set_exclusive_start_key(exclusive_start_key.map(to_sdk_item))
            .send()
            .await
            .map_err(|e| TableError::Service(DisplayErrorContext(&e).to_string()))?;

        let items = output
            .items()
            .iter()
            .map(from_sdk_item)
            .collect::<Result<Vec<_>, _>>()?;
        let last_evaluated_key = output.last_evaluated_key().map(from_sdk_item).transpose()?;

        Ok(QueryPage {
            items,
            last_evaluated_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_conversion_round_trip() {
        let item = Item::from([
            ("s".to_string(), AttributeValue::S("v".to_string())),
            ("n".to_string(), AttributeValue::N("7".to_string())),
            ("b".to_string(), AttributeValue::Bool(true)),
            ("null".to_string(), AttributeValue::Null),
            (
                "m".to_string(),
                AttributeValue::M(HashMap::from([(
                    "k".to_string(),
                    AttributeValue::S("v".to_string()),
                )])),
            ),
        ]);

        let sdk = to_sdk_item(item.clone());
        assert_eq!(sdk.get("null"), Some(&SdkAttributeValue::Null(true)));
        assert_eq!(from_sdk_item(&sdk), Ok(item));
    }

    #[test]
    fn test_unsupported_sdk_attribute() {
        let sdk = HashMap::from([(
            "l".to_string(),
            SdkAttributeValue::Ss(vec!["a".to_string()]),
        )]);
        assert!(matches!(from_sdk_item(&sdk), Err(TableError::Service(_))));
    }
}
