//! Products, categories and warehouses.

use reqwest::Method;
use serde_json::Value;

use stockdesk_core::{CategoryId, ProductId, WarehouseId};
use stockdesk_inventory::{
    Category, CategoryPayload, Product, ProductPayload, Warehouse, WarehousePayload,
};

use super::{ApiClient, CategoryFilter, ProductFilter, Query};
use crate::confirm::Confirmed;
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ApiError> {
        self.get_json("/products", &filter.query()).await
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.get_json(&format!("/products/{id}"), &Query::new()).await
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Value, ApiError> {
        self.send_json(Method::POST, "/products", payload).await
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<Value, ApiError> {
        self.send_json(Method::PUT, &format!("/products/{id}"), payload).await
    }

    pub async fn delete_product(&self, id: Confirmed<ProductId>) -> Result<Value, ApiError> {
        self.delete(&format!("/products/{}", id.id())).await
    }

    pub async fn list_categories(&self, filter: &CategoryFilter) -> Result<Vec<Category>, ApiError> {
        self.get_json("/categories", &filter.query()).await
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<Value, ApiError> {
        self.send_json(Method::POST, "/categories", payload).await
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        payload: &CategoryPayload,
    ) -> Result<Value, ApiError> {
        self.send_json(Method::PUT, &format!("/categories/{id}"), payload).await
    }

    pub async fn delete_category(&self, id: Confirmed<CategoryId>) -> Result<Value, ApiError> {
        self.delete(&format!("/categories/{}", id.id())).await
    }

    pub async fn list_warehouses(&self) -> Result<Vec<Warehouse>, ApiError> {
        self.get_json("/warehouses", &Query::new()).await
    }

    pub async fn create_warehouse(&self, payload: &WarehousePayload) -> Result<Value, ApiError> {
        self.send_json(Method::POST, "/warehouses", payload).await
    }

    pub async fn update_warehouse(
        &self,
        id: WarehouseId,
        payload: &WarehousePayload,
    ) -> Result<Value, ApiError> {
        self.send_json(Method::PUT, &format!("/warehouses/{id}"), payload).await
    }

    pub async fn delete_warehouse(&self, id: Confirmed<WarehouseId>) -> Result<Value, ApiError> {
        self.delete(&format!("/warehouses/{}", id.id())).await
    }
}
