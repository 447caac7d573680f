//! # Item Mappers
//!
//! Conversions between consents, their stored records, raw items and the
//! JSON page tokens handed to API callers.

use super::item::{attribute, consent_item_id, AttributeValue, DynamoDbServiceUserConsent, Item};
use crate::domain::{Consent, ConsentStatus};
use chrono::DateTime;
use serde_json::{Map, Number, Value};
use shared_api::{ApiError, ApiResult};
use std::collections::HashMap;
use tracing::warn;

fn attribute_error(name: &str) -> ApiError {
    ApiError::internal(format!("Unable to parse consent item attribute {name}"))
}

pub struct ConsentMapper;

impl ConsentMapper {
    pub fn to_record(consent: &Consent) -> DynamoDbServiceUserConsent {
        DynamoDbServiceUserConsent {
            id: consent_item_id(&consent.key()),
            service_id: consent.service_id.clone(),
            user_id: consent.user_id.clone(),
            consent_id: consent.consent_id.clone(),
            consent_version: consent.consent_version,
            consent_status: consent.status.as_str().to_string(),
            consent_type: consent.consent_type.clone(),
            consent_data: consent
                .consent_data
                .as_ref()
                .map(|data| data.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            expiry_time: consent.expiry_time.map(|t| t.to_rfc3339()),
        }
    }

    pub fn from_record(record: DynamoDbServiceUserConsent) -> ApiResult<Consent> {
        let status: ConsentStatus = record
            .consent_status
            .parse()
            .map_err(|_| attribute_error(attribute::CONSENT_STATUS))?;
        let expiry_time = record
            .expiry_time
            .as_deref()
            .map(DateTime::parse_from_rfc3339)
            .transpose()
            .map_err(|_| attribute_error(attribute::EXPIRY_TIME))?;

        Ok(Consent {
            service_id: record.service_id,
            user_id: record.user_id,
            consent_id: record.consent_id,
            consent_version: record.consent_version,
            status,
            consent_type: record.consent_type,
            consent_data: record.consent_data.map(|data| data.into_iter().collect()),
            expiry_time,
        })
    }

    pub fn to_item(record: &DynamoDbServiceUserConsent) -> Item {
        let mut item = Item::new();
        item.insert(attribute::ID.into(), AttributeValue::S(record.id.clone()));
        item.insert(
            attribute::SERVICE_ID.into(),
            AttributeValue::S(record.service_id.clone()),
        );
        item.insert(
            attribute::USER_ID.into(),
            AttributeValue::S(record.user_id.clone()),
        );
        item.insert(
            attribute::CONSENT_ID.into(),
            AttributeValue::S(record.consent_id.clone()),
        );
        item.insert(
            attribute::CONSENT_VERSION.into(),
            AttributeValue::N(record.consent_version.to_string()),
        );
        item.insert(
            attribute::CONSENT_STATUS.into(),
            AttributeValue::S(record.consent_status.clone()),
        );
        if let Some(consent_type) = &record.consent_type {
            item.insert(
                attribute::CONSENT_TYPE.into(),
                AttributeValue::S(consent_type.clone()),
            );
        }
        if let Some(data) = &record.consent_data {
            let map = data
                .iter()
                .map(|(k, v)| (k.clone(), AttributeValue::S(v.clone())))
                .collect();
            item.insert(attribute::CONSENT_DATA.into(), AttributeValue::M(map));
        }
        if let Some(expiry_time) = &record.expiry_time {
            item.insert(
                attribute::EXPIRY_TIME.into(),
                AttributeValue::S(expiry_time.clone()),
            );
        }
        item
    }

    pub fn from_item(item: &Item) -> ApiResult<DynamoDbServiceUserConsent> {
        let required_s = |name: &str| -> ApiResult<String> {
            item.get(name)
                .and_then(AttributeValue::as_s)
                .map(str::to_string)
                .ok_or_else(|| attribute_error(name))
        };
        let optional_s = |name: &str| -> ApiResult<Option<String>> {
            match item.get(name) {
                None | Some(AttributeValue::Null) => Ok(None),
                Some(AttributeValue::S(s)) => Ok(Some(s.clone())),
                Some(_) => Err(attribute_error(name)),
            }
        };

        let consent_version = item
            .get(attribute::CONSENT_VERSION)
            .and_then(AttributeValue::as_n)
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(|| attribute_error(attribute::CONSENT_VERSION))?;

        let consent_data = match item.get(attribute::CONSENT_DATA) {
            None | Some(AttributeValue::Null) => None,
            Some(AttributeValue::M(map)) => Some(
                map.iter()
                    .map(|(k, v)| {
                        v.as_s()
                            .map(|s| (k.clone(), s.to_string()))
                            .ok_or_else(|| attribute_error(attribute::CONSENT_DATA))
                    })
                    .collect::<ApiResult<HashMap<_, _>>>()?,
            ),
            Some(_) => return Err(attribute_error(attribute::CONSENT_DATA)),
        };

        Ok(DynamoDbServiceUserConsent {
            id: required_s(attribute::ID)?,
            service_id: required_s(attribute::SERVICE_ID)?,
            user_id: required_s(attribute::USER_ID)?,
            consent_id: required_s(attribute::CONSENT_ID)?,
            consent_version,
            consent_status: required_s(attribute::CONSENT_STATUS)?,
            consent_type: optional_s(attribute::CONSENT_TYPE)?,
            consent_data,
            expiry_time: optional_s(attribute::EXPIRY_TIME)?,
        })
    }

    pub fn consent_to_item(consent: &Consent) -> Item {
        Self::to_item(&Self::to_record(consent))
    }

    pub fn item_to_consent(item: &Item) -> ApiResult<Consent> {
        Self::from_record(Self::from_item(item)?)
    }
}

/// Maps DynamoDB start keys to and from the JSON page tokens callers see,
/// e.g. `{"id":"TestServiceId|TestUserId|TestConsentId"}`.
pub struct PageTokenMapper;

impl PageTokenMapper {
    pub fn to_exclusive_start_key(page_token: Option<&str>) -> ApiResult<Option<Item>> {
        let Some(token) = page_token else {
            return Ok(None);
        };
        let invalid = || ApiError::bad_request(format!("Unable to parse page token {token}"));

        let value: Value = serde_json::from_str(token).map_err(|e| {
            warn!(error = %e, "Page token is not valid JSON");
            invalid()
        })?;
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| json_to_attribute(v).map(|v| (k, v)))
                .collect::<Option<Item>>()
                .map(Some)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }

    pub fn to_page_token(last_evaluated_key: Option<&Item>) -> ApiResult<Option<String>> {
        let Some(key) = last_evaluated_key else {
            return Ok(None);
        };
        let object = attributes_to_json(key).ok_or_else(|| {
            ApiError::bad_request(format!("Unable to parse page token {key:?}"))
        })?;
        serde_json::to_string(&Value::Object(object))
            .map(Some)
            .map_err(|e| ApiError::internal(format!("Unable to encode page token: {e}")))
    }
}

fn json_to_attribute(value: Value) -> Option<AttributeValue> {
    match value {
        Value::Null => Some(AttributeValue::Null),
        Value::Bool(b) => Some(AttributeValue::Bool(b)),
        Value::Number(n) => Some(AttributeValue::N(n.to_string())),
        Value::String(s) => Some(AttributeValue::S(s)),
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| json_to_attribute(v).map(|v| (k, v)))
            .collect::<Option<HashMap<_, _>>>()
            .map(AttributeValue::M),
        Value::Array(_) => None,
    }
}

fn attributes_to_json(item: &HashMap<String, AttributeValue>) -> Option<Map<String, Value>> {
    item.iter()
        .map(|(k, v)| attribute_to_json(v).map(|v| (k.clone(), v)))
        .collect()
}

fn attribute_to_json(value: &AttributeValue) -> Option<Value> {
    match value {
        AttributeValue::S(s) => Some(Value::String(s.clone())),
        AttributeValue::N(n) => n.parse::<Number>().ok().map(Value::Number),
        AttributeValue::Bool(b) => Some(Value::Bool(*b)),
        AttributeValue::Null => Some(Value::Null),
        AttributeValue::M(map) => attributes_to_json(map).map(Value::Object),
    }
}
