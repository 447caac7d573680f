//! # Shared API
//!
//! Plumbing shared by API Gateway proxy handlers. Nothing in this crate knows
//! about a particular resource; it only deals with proxy requests, proxy
//! responses and the failures that can travel between them.
//!
//! ## Crate Structure
//!
//! - `constants` - HTTP methods and status codes
//! - `entities` - Proxy request/response payloads
//! - `errors` - `ApiError` and its status mapping
//! - `parsers` - Path and query-string parameter extraction
//! - `pagination` - In-memory list paging with index tokens
//! - `handler` - Response builders and required path parameter checks

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod constants;
pub mod entities;
pub mod errors;
pub mod handler;
pub mod pagination;
pub mod parsers;

pub use constants::{HttpMethod, HttpStatusCode};
pub use entities::{ApiExceptionResponseContent, ApiRequest, ApiResponse};
pub use errors::{ApiError, ApiResult};
pub use pagination::{ListPage, ListPaginator};
