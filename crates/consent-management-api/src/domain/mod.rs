//! # Domain Layer
//!
//! Consent entities, API models, constants and validation. No I/O happens here.

pub mod constants;
pub mod entities;
pub mod validators;

pub use entities::{
    Consent, ConsentData, ConsentStatus, CreateServiceUserConsentRequestContent,
    CreateServiceUserConsentResponseContent, GetServiceUserConsentResponseContent,
    ListServiceUserConsentResponseContent, ServiceUserConsentKey, ServiceUserKey,
    UpdateServiceUserConsentRequestContent,
};
pub use validators::{
    ConsentValidator, CreateServiceUserConsentRequestValidator,
    UpdateServiceUserConsentRequestValidator,
};
