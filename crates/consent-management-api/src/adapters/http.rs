//! # Local HTTP Adapter
//!
//! Serves the consent API over axum for local development. Each matched
//! request is converted into the same proxy request API Gateway would send, so
//! routing and handlers behave exactly as they do under Lambda.

use crate::domain::constants::api_http_resource;
use crate::router::ConsentManagementApiRouter;
use axum::body::Body;
use axum::extract::{MatchedPath, Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::{json, Value};
use shared_api::{ApiRequest, ApiResponse};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Convert an API Gateway resource template into an axum route,
/// e.g. `/things/{thingId}` into `/things/:thingId`.
pub fn route_path(resource: &str) -> String {
    resource
        .split('/')
        .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => format!(":{name}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Inverse of [`route_path`].
pub fn resource_template(route: &str) -> String {
    route
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{name}}}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub fn app(router: Arc<ConsentManagementApiRouter>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            &route_path(api_http_resource::SERVICE_USER_CONSENTS),
            any(proxy),
        )
        .route(
            &route_path(api_http_resource::SERVICE_USER_CONSENT),
            any(proxy),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(router)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[allow(clippy::too_many_arguments)]
async fn proxy(
    State(router): State<Arc<ConsentManagementApiRouter>>,
    matched: MatchedPath,
    method: Method,
    uri: Uri,
    Path(path_parameters): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let request = ApiRequest {
        http_method: Some(method.as_str().to_string()),
        resource: Some(resource_template(matched.as_str())),
        path: Some(uri.path().to_string()),
        path_parameters: Some(path_parameters),
        query_string_parameters: (!query.is_empty())
            .then(|| query.into_iter().map(|(k, v)| (k, Value::String(v))).collect()),
        headers: Some(
            headers
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), Value::String(v.to_string())))
                })
                .collect(),
        ),
        is_base64_encoded: false,
        body: (!body.is_empty()).then_some(body),
    };

    into_http_response(router.handle_request(Some(request)).await)
}

fn into_http_response(response: ApiResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = Response::builder().status(status);
    for (name, value) in &response.headers {
        builder = builder.header(name, value);
    }
    builder
        .body(Body::from(response.body.unwrap_or_default()))
        .unwrap_or_else(|e| {
            warn!(error = %e, "Unable to build HTTP response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

/// Serve the API on `addr` until ctrl-c.
pub async fn serve(addr: SocketAddr, router: Arc<ConsentManagementApiRouter>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Starting HTTP server");
    axum::serve(listener, app(router))
        .with_graceful_shutdown(shutdown_signal())
        .await
}
