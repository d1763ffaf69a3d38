//! Fleet API client
//!
//! Thin typed wrapper over the external REST endpoints: `GET /api/<entity>`
//! returns the full collection as a JSON array (all filtering and paging is
//! client-side), `POST` creates, `PUT ?id=` updates, `DELETE ?id=` removes.

use std::time::Duration;

use serde_json::Value;

use super::error::ApiError;
use super::session::Session;
use crate::config::ApiConfig;
use crate::record::Record;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session: Session,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url, session })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.base_url,
            Session::new(config.token.clone()),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.bearer() {
            Some(bearer) => request.header("Authorization", bearer),
            None => request,
        }
    }

    /// Fetch the full collection snapshot for an entity.
    pub async fn list(&self, path: &str) -> Result<Vec<Record>, ApiError> {
        let response = self.with_auth(self.http.get(self.endpoint_url(path))).send().await?;
        let response = check_status(response).await?;
        response
            .json::<Vec<Record>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Create one record; returns the created record as sent back upstream.
    pub async fn create(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response =
            self.with_auth(self.http.post(self.endpoint_url(path)).json(body)).send().await?;
        let response = check_status(response).await?;
        response.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Update one record by id.
    pub async fn update(&self, path: &str, id: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self
            .with_auth(self.http.put(self.endpoint_url(path)).query(&[("id", id)]).json(body))
            .send()
            .await?;
        let response = check_status(response).await?;
        response.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Delete one record by id.
    pub async fn delete(&self, path: &str, id: &str) -> Result<(), ApiError> {
        let response = self
            .with_auth(self.http.delete(self.endpoint_url(path)).query(&[("id", id)]))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Map non-2xx responses to the error taxonomy. The upstream JSON `error`
/// field is surfaced verbatim when present, with a generic fallback.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status.as_u16() == 401 || status.as_u16() == 403 {
        return Err(ApiError::Unauthorized);
    }

    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

    Err(ApiError::Api { status: status.as_u16(), message })
}
