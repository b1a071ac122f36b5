use reqwest::Method;
use serde::Deserialize;

use stockdesk_auth::{LoginRequest, User};

use super::{ApiClient, Query};
use crate::error::ApiError;

/// Answer of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Deserialize)]
struct VerifyResponse {
    user: User,
}

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let resp = self
            .send(self.request(Method::POST, "/auth/login").json(request))
            .await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Check the attached token and fetch the user it belongs to.
    pub async fn verify(&self) -> Result<User, ApiError> {
        let body: VerifyResponse = self.get_json("/auth/verify", &Query::new()).await?;
        Ok(body.user)
    }
}
