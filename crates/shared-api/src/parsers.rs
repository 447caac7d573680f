//! # Parameter Parsers
//!
//! Extract typed path and query-string parameters from a proxy request.
//! Every failure is a `BadRequest` naming the offending parameter.

use crate::entities::ApiRequest;
use crate::errors::{ApiError, ApiResult};
use serde_json::Value;
use tracing::warn;

fn path_parameter_error(name: &str) -> ApiError {
    ApiError::bad_request(format!("Unable to parse {name} path parameter from request"))
}

fn query_parameter_error(name: &str) -> ApiError {
    ApiError::bad_request(format!("Unable to parse {name} query parameter from request"))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read a required path parameter.
pub fn parse_path_parameter(request: Option<&ApiRequest>, name: &str) -> ApiResult<String> {
    request
        .and_then(|r| r.path_parameters.as_ref())
        .and_then(|params| params.get(name))
        .cloned()
        .ok_or_else(|| path_parameter_error(name))
}

fn query_value<'a>(request: Option<&'a ApiRequest>, name: &str) -> Option<&'a Value> {
    request
        .and_then(|r| r.query_string_parameters.as_ref())
        .and_then(|params| params.get(name))
        .filter(|value| !value.is_null())
}

/// Read an optional string query parameter.
pub fn parse_string_query_parameter(
    request: Option<&ApiRequest>,
    name: &str,
) -> ApiResult<Option<String>> {
    match query_value(request, name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => {
            warn!(
                parameter = name,
                expected = "string",
                actual = json_type_name(other),
                "Query parameter has unexpected type"
            );
            Err(query_parameter_error(name))
        }
    }
}

/// Read an optional integer query parameter given as a number or a decimal string.
pub fn parse_int_query_parameter(
    request: Option<&ApiRequest>,
    name: &str,
) -> ApiResult<Option<i64>> {
    match query_value(request, name) {
        None => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| {
            warn!(parameter = name, value = %n, "Query parameter is not an integer");
            query_parameter_error(name)
        }),
        Some(Value::String(s)) => s.parse::<i64>().map(Some).map_err(|e| {
            warn!(parameter = name, value = %s, error = %e, "Query parameter is not an integer");
            query_parameter_error(name)
        }),
        Some(other) => {
            warn!(
                parameter = name,
                expected = "integer",
                actual = json_type_name(other),
                "Query parameter has unexpected type"
            );
            Err(query_parameter_error(name))
        }
    }
}
