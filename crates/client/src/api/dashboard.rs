use serde::{Deserialize, Serialize};

use stockdesk_inventory::Product;

use super::{ApiClient, Query};
use crate::error::ApiError;

/// Monthly entry total of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntryTotal {
    #[serde(rename = "nombre")]
    pub name: String,
    pub sku: String,
    #[serde(rename = "total_entradas", default, deserialize_with = "lenient_i64")]
    pub total: i64,
}

/// Monthly exit total of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductExitTotal {
    #[serde(rename = "nombre")]
    pub name: String,
    pub sku: String,
    #[serde(rename = "total_salidas", default, deserialize_with = "lenient_i64")]
    pub total: i64,
}

/// `GET /dashboard/stats`. This endpoint uses camelCase keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_products: i64,
    pub low_stock_products: i64,
    pub total_users: i64,
    pub top_entries_month: Vec<ProductEntryTotal>,
    pub low_exits_month: Vec<ProductExitTotal>,
    pub low_stock_alerts: Vec<Product>,
}

/// Aggregates may arrive as JSON numbers or as numeric strings.
fn lenient_i64<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v),
        Raw::Float(v) => Ok(v as i64),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(|v| v as i64)
            .map_err(|_| serde::de::Error::custom(format!("'{s}' is not a number"))),
    }
}

impl ApiClient {
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_json("/dashboard/stats", &Query::new()).await
    }
}
