use reqwest::Method;
use serde_json::Value;

use stockdesk_auth::{User, UserPayload};
use stockdesk_core::UserId;

use super::{ApiClient, Query};
use crate::confirm::Confirmed;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/users", &Query::new()).await
    }

    pub async fn create_user(&self, payload: &UserPayload) -> Result<Value, ApiError> {
        self.send_json(Method::POST, "/users", payload).await
    }

    pub async fn update_user(&self, id: UserId, payload: &UserPayload) -> Result<Value, ApiError> {
        self.send_json(Method::PUT, &format!("/users/{id}"), payload).await
    }

    pub async fn delete_user(&self, id: Confirmed<UserId>) -> Result<Value, ApiError> {
        self.delete(&format!("/users/{}", id.id())).await
    }
}
