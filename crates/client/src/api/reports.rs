use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use super::ApiClient;
use crate::error::ApiError;
use crate::reports::ReportRequest;

/// Raw answer of a report endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportBody {
    /// The server sent rows as JSON; CSV is rendered client-side.
    Json(Value),
    /// A ready-made file (PDF, or CSV produced by the server).
    Bytes(Vec<u8>),
}

impl ApiClient {
    pub async fn download_report(&self, request: &ReportRequest) -> Result<ReportBody, ApiError> {
        let req = self
            .request(Method::GET, request.kind.endpoint())
            .query(&request.query());
        let resp = self.send(req).await?;

        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));

        if is_json {
            let value = resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))?;
            Ok(ReportBody::Json(value))
        } else {
            let bytes = resp.bytes().await.map_err(|e| ApiError::Network(e.to_string()))?;
            Ok(ReportBody::Bytes(bytes.to_vec()))
        }
    }
}
