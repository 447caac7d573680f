//! Consent repository adapters.

pub mod memory;

pub use memory::InMemoryServiceUserConsentRepository;
