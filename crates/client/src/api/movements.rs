use reqwest::Method;
use serde_json::Value;

use stockdesk_core::MovementId;
use stockdesk_inventory::{Movement, MovementPayload};

use super::{ApiClient, MovementFilter, Query};
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_movements(&self, filter: &MovementFilter) -> Result<Vec<Movement>, ApiError> {
        self.get_json("/movements", &filter.query()).await
    }

    pub async fn get_movement(&self, id: MovementId) -> Result<Movement, ApiError> {
        self.get_json(&format!("/movements/{id}"), &Query::new()).await
    }

    /// Movements are append-only; there is no update or delete.
    pub async fn create_movement(&self, payload: &MovementPayload) -> Result<Value, ApiError> {
        self.send_json(Method::POST, "/movements", payload).await
    }
}
