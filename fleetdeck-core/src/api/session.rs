//! Explicit session context
//!
//! The bearer token is carried by a session object handed to the API client,
//! not read out of ambient global state, so expiry/redirect is decided in
//! one place.

/// Credentials for the fleet API.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        Self { token }
    }

    /// Anonymous session; requests go out without an Authorization header
    /// and a 401 surfaces as [`crate::api::ApiError::Unauthorized`].
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Value for the `Authorization` header, if any.
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }
}
