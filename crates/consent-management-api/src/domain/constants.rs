//! Resource templates and parameter names of the consent API.

/// Resource templates as registered with API Gateway.
pub mod api_http_resource {
    pub const SERVICE_USER_CONSENTS: &str =
        "/v1/consent-management/services/{serviceId}/users/{userId}/consents";
    pub const SERVICE_USER_CONSENT: &str =
        "/v1/consent-management/services/{serviceId}/users/{userId}/consents/{consentId}";
}

pub mod path_parameter {
    pub const SERVICE_ID: &str = "serviceId";
    pub const USER_ID: &str = "userId";
    pub const CONSENT_ID: &str = "consentId";

    /// Required by the consents collection resource.
    pub const SERVICE_USER: [&str; 2] = [SERVICE_ID, USER_ID];
    /// Required by the single consent resource.
    pub const SERVICE_USER_CONSENT: [&str; 3] = [SERVICE_ID, USER_ID, CONSENT_ID];
}

pub mod query_parameter {
    pub const LIMIT: &str = "limit";
    pub const PAGE_TOKEN: &str = "pageToken";
}

/// Operation names used in logs and body parse errors.
pub mod operation {
    pub const CREATE_SERVICE_USER_CONSENT: &str = "CreateServiceUserConsent";
    pub const GET_SERVICE_USER_CONSENT: &str = "GetServiceUserConsent";
    pub const LIST_SERVICE_USER_CONSENTS: &str = "ListServiceUserConsents";
    pub const UPDATE_SERVICE_USER_CONSENT: &str = "UpdateServiceUserConsent";
}

/// First version of every newly created consent.
pub const INITIAL_CONSENT_VERSION: u32 = 1;
