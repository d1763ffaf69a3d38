//! Fleet API error taxonomy
//!
//! Three observable failure classes: transport failures, non-2xx responses
//! carrying an upstream `error` string, and rejected credentials. Everything
//! is converted to a user-visible notification at the handler layer; nothing
//! crashes a view.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (DNS, connect, timeout, ...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the fleet API.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Missing or rejected bearer token; the caller should redirect to the
    /// login flow.
    #[error("authentication required")]
    Unauthorized,

    /// 2xx response whose body was not the expected JSON shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message shown in the notification banner. Transport errors get a
    /// generic message; API errors surface the upstream `error` string
    /// verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Network error. Please try again.".to_string(),
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Decode(_) => "Unexpected response from the server.".to_string(),
        }
    }

    /// Short machine-readable code used in app API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network_error",
            ApiError::Api { .. } => "api_error",
            ApiError::Unauthorized => "login_required",
            ApiError::Decode(_) => "bad_upstream_response",
        }
    }
}
