//! HTTP constants used by proxy handlers.

use std::fmt;
use std::str::FromStr;

/// HTTP methods understood by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a method name is not one of [`HttpMethod`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported http method: {0}")]
pub struct UnknownHttpMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownHttpMethod;

    /// Method names are matched in upper case only, as API Gateway sends them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            other => Err(UnknownHttpMethod(other.to_string())),
        }
    }
}

/// Status codes produced by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpStatusCode {
    Success,
    BadRequest,
    NotFound,
    Conflict,
    TooManyRequests,
    InternalServerError,
}

impl HttpStatusCode {
    /// Numeric status code.
    pub fn value(&self) -> u16 {
        match self {
            HttpStatusCode::Success => 200,
            HttpStatusCode::BadRequest => 400,
            HttpStatusCode::NotFound => 404,
            HttpStatusCode::Conflict => 409,
            HttpStatusCode::TooManyRequests => 429,
            HttpStatusCode::InternalServerError => 500,
        }
    }
}

/// Serialized field names of an [`ApiResponse`](crate::ApiResponse).
pub mod response_parameter_name {
    pub const BODY: &str = "body";
    pub const HEADERS: &str = "headers";
    pub const STATUS_CODE: &str = "statusCode";
}

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";
