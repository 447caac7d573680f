//! AWS Lambda entry point for API Gateway proxy events.

use crate::router::ConsentManagementApiRouter;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use shared_api::{ApiRequest, ApiResponse};
use std::sync::Arc;
use tracing::{info_span, warn, Instrument};

/// Decode a proxy event. A null or undecodable payload yields `None`, which the
/// router answers with an unsupported operation response.
pub fn request_from_payload(payload: Value) -> Option<ApiRequest> {
    if payload.is_null() {
        return None;
    }
    serde_json::from_value(payload)
        .map_err(|e| warn!(error = %e, "Unable to decode API Gateway proxy event"))
        .ok()
}

pub async fn handle_event(
    router: &ConsentManagementApiRouter,
    event: LambdaEvent<Value>,
) -> Result<ApiResponse, Error> {
    let (payload, context) = event.into_parts();
    let span = info_span!("lambda_request", request_id = %context.request_id);
    let response = router
        .handle_request(request_from_payload(payload))
        .instrument(span)
        .await;
    Ok(response)
}

/// Serve Lambda invocations until the runtime shuts down.
pub async fn run(router: Arc<ConsentManagementApiRouter>) -> Result<(), Error> {
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let router = Arc::clone(&router);
        async move { handle_event(&router, event).await }
    }))
    .await
}
