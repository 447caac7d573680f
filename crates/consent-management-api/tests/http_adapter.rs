//! The local axum adapter serves the same API as the Lambda entry point.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use consent_management_api::adapters::http::app;
use consent_management_api::adapters::repository::InMemoryServiceUserConsentRepository;
use consent_management_api::ConsentManagementApiRouter;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const CONSENTS_PATH: &str = "/v1/consent-management/services/svc/users/usr/consents";

fn test_app() -> axum::Router {
    app(Arc::new(ConsentManagementApiRouter::with_repository(
        Arc::new(InMemoryServiceUserConsentRepository::new()),
    )))
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_create_then_get_over_http() {
    let app = test_app();

    let request = Request::post(CONSENTS_PATH)
        .header("content-type", "application/json")
        .body(Body::from(json!({"status": "ACTIVE"}).to_string()))
        .unwrap();
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    let consent_id = body["consentId"].as_str().unwrap().to_string();

    let request = Request::get(format!("{CONSENTS_PATH}/{consent_id}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["consentId"], consent_id);
    assert_eq!(body["data"]["consentVersion"], 1);

    let request = Request::get(format!("{CONSENTS_PATH}?limit=1"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_unsupported_method_is_bad_request() {
    let request = Request::delete(format!("{CONSENTS_PATH}/abc"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "message": "Unsupported resource operation, received resource '/v1/consent-management/services/{serviceId}/users/{userId}/consents/{consentId}' and operation 'DELETE'"
        })
    );
}

#[tokio::test]
async fn test_invalid_limit_over_http() {
    let request = Request::get(format!("{CONSENTS_PATH}?limit=zero"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"message": "Unable to parse limit query parameter from request"})
    );
}
