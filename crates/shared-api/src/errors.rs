//! # API Errors
//!
//! Failures that surface to API callers. Each variant maps to exactly one
//! status code, and its `Display` output is the message returned in the
//! response body.

use crate::constants::HttpStatusCode;

/// Result alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request was malformed or failed validation.
    #[error("{0}")]
    BadRequest(String),
    /// The request conflicts with stored state.
    #[error("{0}")]
    Conflict(String),
    /// The requested resource does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Backend or serialization failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn status_code(&self) -> HttpStatusCode {
        match self {
            ApiError::BadRequest(_) => HttpStatusCode::BadRequest,
            ApiError::Conflict(_) => HttpStatusCode::Conflict,
            ApiError::NotFound(_) => HttpStatusCode::NotFound,
            ApiError::Internal(_) => HttpStatusCode::InternalServerError,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m)
            | ApiError::Conflict(m)
            | ApiError::NotFound(m)
            | ApiError::Internal(m) => m,
        }
    }

    /// Whether the failure is the caller's fault (4xx).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ApiError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::bad_request("x").status_code(),
            HttpStatusCode::BadRequest
        );
        assert_eq!(ApiError::conflict("x").status_code(), HttpStatusCode::Conflict);
        assert_eq!(ApiError::not_found("x").status_code(), HttpStatusCode::NotFound);
        assert_eq!(
            ApiError::internal("x").status_code(),
            HttpStatusCode::InternalServerError
        );
    }

    #[test]
    fn test_display_is_bare_message() {
        let error = ApiError::not_found("No thing found");
        assert_eq!(error.to_string(), "No thing found");
        assert_eq!(error.message(), "No thing found");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ApiError::bad_request("x").is_client_error());
        assert!(ApiError::conflict("x").is_client_error());
        assert!(!ApiError::internal("x").is_client_error());
    }
}
