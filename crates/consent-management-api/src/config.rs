//! Service configuration with validation.
//!
//! Defaults suit a Lambda deployment against the `ServiceUserConsent` table.
//! Every value can be overridden through `CONSENT_API_*` environment variables.

use crate::adapters::dynamodb::item::{DEFAULT_SERVICE_USER_INDEX_NAME, DEFAULT_TABLE_NAME};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

/// Environment variable set by the Lambda execution environment.
pub const LAMBDA_RUNTIME_API_ENV: &str = "AWS_LAMBDA_RUNTIME_API";

pub mod env {
    pub const REPOSITORY: &str = "CONSENT_API_REPOSITORY";
    pub const TABLE_NAME: &str = "CONSENT_API_TABLE_NAME";
    pub const SERVICE_USER_INDEX_NAME: &str = "CONSENT_API_SERVICE_USER_INDEX_NAME";
    pub const DYNAMODB_ENDPOINT_URL: &str = "CONSENT_API_DYNAMODB_ENDPOINT_URL";
    pub const HTTP_HOST: &str = "CONSENT_API_HTTP_HOST";
    pub const HTTP_PORT: &str = "CONSENT_API_HTTP_PORT";
    pub const LOG_LEVEL: &str = "CONSENT_API_LOG_LEVEL";
    pub const LOG_FORMAT: &str = "CONSENT_API_LOG_FORMAT";
    pub const RUNTIME: &str = "CONSENT_API_RUNTIME";
}

/// Main service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Consent storage backend
    pub repository: RepositoryBackend,
    /// DynamoDB table settings
    pub dynamodb: DynamoDbConfig,
    /// Local HTTP server settings
    pub http: HttpConfig,
    /// Logging settings
    pub log: LogConfig,
    /// Entry point selection
    pub runtime: RuntimeMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryBackend {
    Memory,
    #[default]
    Dynamodb,
}

impl FromStr for RepositoryBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(RepositoryBackend::Memory),
            "dynamodb" => Ok(RepositoryBackend::Dynamodb),
            _ => Err(ConfigError::InvalidValue {
                key: env::REPOSITORY,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamoDbConfig {
    pub table_name: String,
    /// Global secondary index keyed by serviceId and userId
    pub service_user_index_name: String,
    /// Override endpoint, e.g. DynamoDB Local
    pub endpoint_url: Option<String>,
}

impl Default for DynamoDbConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            service_user_index_name: DEFAULT_SERVICE_USER_INDEX_NAME.to_string(),
            endpoint_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    #[default]
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                key: env::LOG_FORMAT,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    /// Lambda when running inside the Lambda environment, HTTP otherwise
    #[default]
    Auto,
    Lambda,
    Http,
}

impl FromStr for RuntimeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(RuntimeMode::Auto),
            "lambda" => Ok(RuntimeMode::Lambda),
            "http" => Ok(RuntimeMode::Http),
            _ => Err(ConfigError::InvalidValue {
                key: env::RUNTIME,
                value: s.to_string(),
            }),
        }
    }
}

impl ServiceConfig {
    /// Load defaults overridden by process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load defaults overridden by `lookup`, then validate.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(env::REPOSITORY) {
            config.repository = value.parse()?;
        }
        if let Some(value) = lookup(env::TABLE_NAME) {
            config.dynamodb.table_name = value;
        }
        if let Some(value) = lookup(env::SERVICE_USER_INDEX_NAME) {
            config.dynamodb.service_user_index_name = value;
        }
        if let Some(value) = lookup(env::DYNAMODB_ENDPOINT_URL) {
            config.dynamodb.endpoint_url = Some(value).filter(|v| !v.is_empty());
        }
        if let Some(value) = lookup(env::HTTP_HOST) {
            config.http.host = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: env::HTTP_HOST,
                value,
            })?;
        }
        if let Some(value) = lookup(env::HTTP_PORT) {
            config.http.port = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: env::HTTP_PORT,
                value,
            })?;
        }
        if let Some(value) = lookup(env::LOG_LEVEL) {
            config.log.level = value;
        }
        if let Some(value) = lookup(env::LOG_FORMAT) {
            config.log.format = value.parse()?;
        }
        if let Some(value) = lookup(env::RUNTIME) {
            config.runtime = value.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dynamodb.table_name.trim().is_empty() {
            return Err(ConfigError::Invalid("table_name cannot be empty".into()));
        }
        if self.dynamodb.service_user_index_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "service_user_index_name cannot be empty".into(),
            ));
        }
        if self.http.port == 0 {
            return Err(ConfigError::Invalid("http port cannot be 0".into()));
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level cannot be empty".into()));
        }
        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }

    /// Resolve `Auto` against the environment variable lookup.
    pub fn resolved_runtime<F>(&self, lookup: F) -> RuntimeMode
    where
        F: Fn(&str) -> Option<String>,
    {
        match self.runtime {
            RuntimeMode::Auto if lookup(LAMBDA_RUNTIME_API_ENV).is_some() => RuntimeMode::Lambda,
            RuntimeMode::Auto => RuntimeMode::Http,
            explicit => explicit,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds an unusable value
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.repository, RepositoryBackend::Dynamodb);
        assert_eq!(config.dynamodb.table_name, "ServiceUserConsent");
        assert_eq!(config.dynamodb.service_user_index_name, "ServiceUserIndex");
        assert_eq!(config.http_addr().port(), 8080);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_env_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            (env::REPOSITORY, "memory"),
            (env::TABLE_NAME, "Consents"),
            (env::DYNAMODB_ENDPOINT_URL, "http://localhost:8000"),
            (env::HTTP_HOST, "0.0.0.0"),
            (env::HTTP_PORT, "9000"),
            (env::LOG_LEVEL, "debug"),
            (env::LOG_FORMAT, "TEXT"),
            (env::RUNTIME, "http"),
        ]))
        .unwrap();

        assert_eq!(config.repository, RepositoryBackend::Memory);
        assert_eq!(config.dynamodb.table_name, "Consents");
        assert_eq!(
            config.dynamodb.endpoint_url.as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(config.http_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, LogFormat::Text);
        assert_eq!(config.runtime, RuntimeMode::Http);
    }

    #[test]
    fn test_invalid_env_values() {
        assert_eq!(
            ServiceConfig::from_lookup(lookup(&[(env::HTTP_PORT, "http")])),
            Err(ConfigError::InvalidValue {
                key: env::HTTP_PORT,
                value: "http".into()
            })
        );
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[(env::REPOSITORY, "postgres")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[(env::HTTP_PORT, "0")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[(env::TABLE_NAME, " ")])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_runtime_resolution() {
        let config = ServiceConfig::default();
        assert_eq!(
            config.resolved_runtime(lookup(&[(LAMBDA_RUNTIME_API_ENV, "127.0.0.1:9001")])),
            RuntimeMode::Lambda
        );
        assert_eq!(config.resolved_runtime(lookup(&[])), RuntimeMode::Http);

        let config = ServiceConfig {
            runtime: RuntimeMode::Http,
            ..ServiceConfig::default()
        };
        assert_eq!(
            config.resolved_runtime(lookup(&[(LAMBDA_RUNTIME_API_ENV, "x")])),
            RuntimeMode::Http
        );
    }

    #[test]
    fn test_config_deserializes_partial_json() {
        let config: ServiceConfig =
            serde_json::from_str(r#"{"repository":"memory","http":{"port":3000}}"#).unwrap();
        assert_eq!(config.repository, RepositoryBackend::Memory);
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.dynamodb, DynamoDbConfig::default());
    }
}
