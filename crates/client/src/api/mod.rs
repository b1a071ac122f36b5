//! Typed bindings for the inventory REST API.
//!
//! One [`ApiClient`] per process. It attaches the bearer token to every
//! request and turns non-2xx answers into [`ApiError`]; it never retries.

mod auth;
mod catalog;
mod dashboard;
mod filters;
mod movements;
mod reports;
mod users;

pub use auth::LoginResponse;
pub use dashboard::{DashboardStats, ProductEntryTotal, ProductExitTotal};
pub use filters::{CategoryFilter, MovementFilter, ProductFilter};
pub use reports::ReportBody;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;

pub(crate) type Query = Vec<(&'static str, String)>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { http, base_url: config.api_url.clone(), token: None })
    }

    /// Client with default settings against `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        debug!(status = status.as_u16(), url = %resp.url(), "api response");
        if status.is_success() {
            Ok(resp)
        } else {
            Err(error_from_response(resp).await)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T, ApiError> {
        let resp = self.send(self.request(Method::GET, path).query(query)).await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let resp = self.send(self.request(method, path).json(body)).await?;
        body_or_null(resp).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let resp = self.send(self.request(Method::DELETE, path)).await?;
        body_or_null(resp).await
    }
}

/// Write endpoints answer with the stored row or a `{message}`; both are optional.
async fn body_or_null(resp: Response) -> Result<Value, ApiError> {
    let bytes = resp.bytes().await.map_err(|e| ApiError::Network(e.to_string()))?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

async fn error_from_response(resp: Response) -> ApiError {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    if status == StatusCode::UNAUTHORIZED {
        ApiError::Unauthorized(message)
    } else {
        ApiError::Rejected { status: status.as_u16(), message }
    }
}
