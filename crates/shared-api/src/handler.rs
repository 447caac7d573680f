//! # Request Handler Support
//!
//! Building blocks shared by every operation handler: required path parameter
//! checks, body decoding and response construction.

use crate::constants::HttpStatusCode;
use crate::entities::{ApiExceptionResponseContent, ApiRequest, ApiResponse};
use crate::errors::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, warn};

const SERIALIZATION_FAILURE: &str = "Unable to serialize response content";

/// Verify that every name in `required` is present in the request's path parameters.
///
/// The error lists all required names in declared order, not just the missing ones.
pub fn check_required_path_parameters(
    request: Option<&ApiRequest>,
    required: &[&str],
) -> ApiResult<()> {
    let params = request.and_then(|r| r.path_parameters.as_ref());
    let all_present = required
        .iter()
        .all(|name| params.is_some_and(|p| p.contains_key(*name)));

    if all_present {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "Missing required path parameters, expected {}",
            required.join(", ")
        )))
    }
}

/// Decode a JSON request body into `T`.
///
/// Returns `Ok(None)` for a missing or blank body. Decode failures are logged
/// and reported as `Unable to parse {operation} request content`.
pub fn parse_body<T: DeserializeOwned>(
    request: Option<&ApiRequest>,
    operation: &str,
) -> ApiResult<Option<T>> {
    let Some(body) = request.and_then(ApiRequest::non_empty_body) else {
        return Ok(None);
    };

    serde_json::from_str(body).map(Some).map_err(|e| {
        warn!(operation, error = %e, "Failed to decode request body");
        ApiError::bad_request(format!("Unable to parse {operation} request content"))
    })
}

/// 200 response with an optional JSON body.
pub fn build_success_response<T: Serialize>(body: Option<&T>) -> ApiResponse {
    match body.map(serde_json::to_string).transpose() {
        Ok(body) => ApiResponse::json(HttpStatusCode::Success, body),
        Err(e) => {
            error!(error = %e, "Failed to encode response body");
            build_error_response(&ApiError::internal(SERIALIZATION_FAILURE))
        }
    }
}

/// Error response carrying the error's status and message.
pub fn build_error_response(err: &ApiError) -> ApiResponse {
    let content = ApiExceptionResponseContent {
        message: err.message().to_string(),
    };
    // A struct holding a single String always encodes.
    let body = serde_json::to_string(&content).ok();
    ApiResponse::json(err.status_code(), body)
}

/// Turn an operation result into a response, logging failures at a level
/// matching their status class.
pub fn into_response<T: Serialize>(operation: &str, result: ApiResult<Option<T>>) -> ApiResponse {
    match result {
        Ok(body) => build_success_response(body.as_ref()),
        Err(err) => {
            let status = err.status_code().value();
            if err.is_client_error() {
                warn!(operation, status, error = %err, "Request rejected");
            } else {
                error!(operation, status, error = %err, "Request failed");
            }
            build_error_response(&err)
        }
    }
}
