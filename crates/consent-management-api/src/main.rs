//! # Consent Management API
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from `CONSENT_API_*` environment variables
//! 2. Initialize logging
//! 3. Build the consent repository (DynamoDB or in-memory)
//! 4. Serve requests through Lambda or a local HTTP server

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use consent_management_api::adapters::http;
use consent_management_api::adapters::repository::InMemoryServiceUserConsentRepository;
use consent_management_api::config::{RepositoryBackend, RuntimeMode, ServiceConfig};
use consent_management_api::ports::ServiceUserConsentRepository;
use consent_management_api::{telemetry, ConsentManagementApiRouter};

async fn build_repository(config: &ServiceConfig) -> Result<Arc<dyn ServiceUserConsentRepository>> {
    match config.repository {
        RepositoryBackend::Memory => {
            info!("Using in-memory consent repository");
            Ok(Arc::new(InMemoryServiceUserConsentRepository::new()))
        }
        RepositoryBackend::Dynamodb => dynamodb_repository(config).await,
    }
}

#[cfg(feature = "dynamodb")]
async fn dynamodb_repository(config: &ServiceConfig) -> Result<Arc<dyn ServiceUserConsentRepository>> {
    use consent_management_api::adapters::dynamodb::{
        AwsSdkConsentTable, DynamoDbServiceUserConsentRepository,
    };

    let table = AwsSdkConsentTable::from_env(&config.dynamodb).await;
    Ok(Arc::new(DynamoDbServiceUserConsentRepository::new(Arc::new(
        table,
    ))))
}

#[cfg(not(feature = "dynamodb"))]
async fn dynamodb_repository(_config: &ServiceConfig) -> Result<Arc<dyn ServiceUserConsentRepository>> {
    anyhow::bail!("DynamoDB repository requested but the `dynamodb` feature is disabled")
}

#[cfg(feature = "lambda")]
async fn run_lambda(router: Arc<ConsentManagementApiRouter>) -> Result<()> {
    info!("Starting Lambda runtime");
    consent_management_api::adapters::lambda::run(router)
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("Lambda runtime failed")
}

#[cfg(not(feature = "lambda"))]
async fn run_lambda(_router: Arc<ConsentManagementApiRouter>) -> Result<()> {
    anyhow::bail!("Lambda runtime requested but the `lambda` feature is disabled")
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::from_env().context("Invalid configuration")?;
    telemetry::init_logging(&config.log).context("Failed to initialize logging")?;

    info!(
        repository = ?config.repository,
        table = %config.dynamodb.table_name,
        "Consent Management API starting"
    );

    let repository = build_repository(&config).await?;
    let router = Arc::new(ConsentManagementApiRouter::with_repository(repository));

    match config.resolved_runtime(|key| std::env::var(key).ok()) {
        RuntimeMode::Lambda => run_lambda(router).await,
        _ => http::serve(config.http_addr(), router)
            .await
            .context("HTTP server failed"),
    }
}
