//! # Ports Layer
//!
//! - `inbound` - API offered to handlers
//! - `outbound` - Persistence required from adapters

pub mod inbound;
pub mod outbound;

pub use inbound::ConsentManagementApi;
pub use outbound::ServiceUserConsentRepository;
