//! # Consent Management API
//!
//! Manages the consents users grant to services. Requests arrive as API
//! Gateway proxy events (through Lambda, or a local axum server), are routed
//! by resource and method, and read or write consents in DynamoDB.
//!
//! ```text
//! API Gateway ──proxy event──→ Lambda ──┐
//! local HTTP (axum) ────────────────────┼──→ ConsentManagementApiRouter
//!                                       │          ↓
//!                                       │    request handlers
//!                                       │          ↓
//!                                       │    ConsentManagementService
//!                                       │          ↓
//!                                       └──  ServiceUserConsentRepository
//!                                             ├─ in-memory
//!                                             └─ DynamoDB (ConsentTable)
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Non-blank keys | serviceId, userId and consentId are never blank |
//! | Initial version | New consents start at version 1 |
//! | Sequential versions | An update must carry the stored version plus one |
//! | Unique consents | Creating an existing key is a conflict |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, API models, validators
//! - `ports/` - Inbound API and outbound repository traits
//! - `service.rs` - Consent activities implementing the inbound API
//! - `handlers/` - One proxy request handler per operation
//! - `router.rs` - Resource and method dispatch
//! - `adapters/` - Repositories, DynamoDB, HTTP and Lambda
//! - `config.rs` / `telemetry.rs` - Configuration and logging
//!
//! ## Usage
//!
//! ```ignore
//! use consent_management_api::adapters::repository::InMemoryServiceUserConsentRepository;
//! use consent_management_api::ConsentManagementApiRouter;
//!
//! let router = ConsentManagementApiRouter::with_repository(Arc::new(
//!     InMemoryServiceUserConsentRepository::new(),
//! ));
//! let response = router.handle_request(Some(request)).await;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod ports;
pub mod router;
pub mod service;
pub mod telemetry;

#[cfg(test)]
mod test_utils;

pub use config::ServiceConfig;
pub use domain::{Consent, ConsentStatus, ServiceUserConsentKey, ServiceUserKey};
pub use router::ConsentManagementApiRouter;
pub use service::ConsentManagementService;
