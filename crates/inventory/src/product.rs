use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockdesk_core::{
    CategoryId, Entity, FieldErrors, IntegerInput, ProductId, Sku, WarehouseId, parse_integer,
};

use crate::stock::StockLevels;
use crate::warehouse::Warehouse;

/// A product row as returned by `GET /products`.
///
/// List endpoints pre-join display labels (`categoria`, `almacen`) so a table
/// can render without resolving foreign keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub warehouse_id: Option<WarehouseId>,
    pub stock: i64,
    #[serde(rename = "stock_minimo")]
    pub min_stock: i64,
    #[serde(rename = "stock_maximo")]
    pub max_stock: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "categoria", default)]
    pub category_label: Option<String>,
    #[serde(rename = "almacen", default)]
    pub warehouse_label: Option<String>,
}

impl Product {
    /// Label used in product selectors and the picker search box.
    pub fn display_label(&self) -> String {
        format!("{} - {} (Stock: {})", self.name, self.sku, self.stock)
    }

    /// Case-insensitive match on name or SKU; an empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.sku.to_lowercase().contains(&term)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

impl StockLevels for Product {
    fn stock(&self) -> i64 {
        self.stock
    }

    fn min_stock(&self) -> i64 {
        self.min_stock
    }

    fn max_stock(&self) -> i64 {
        self.max_stock
    }
}

/// Body of `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    pub sku: String,
    #[serde(rename = "nombre")]
    pub name: String,
    pub category_id: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_id: Option<WarehouseId>,
    #[serde(rename = "stock_minimo")]
    pub min_stock: i64,
    #[serde(rename = "stock_maximo")]
    pub max_stock: i64,
}

/// Raw input of the create/edit product form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub sku: String,
    pub name: String,
    pub category_id: Option<CategoryId>,
    pub warehouse_id: Option<WarehouseId>,
    pub min_stock: String,
    pub max_stock: String,
}

impl ProductForm {
    /// Blank form for a new product; the first warehouse is preselected.
    pub fn for_new(warehouses: &[Warehouse]) -> Self {
        Self {
            warehouse_id: warehouses.first().map(|w| w.id),
            ..Self::default()
        }
    }

    /// Form prefilled from an existing product.
    pub fn for_edit(product: &Product) -> Self {
        Self {
            sku: product.sku.clone(),
            name: product.name.clone(),
            category_id: product.category_id,
            warehouse_id: product.warehouse_id,
            min_stock: product.min_stock.to_string(),
            max_stock: product.max_stock.to_string(),
        }
    }

    /// Validate every field and build the payload.
    ///
    /// A warehouse is only required once at least one exists; with none
    /// registered the field is not shown and not sent.
    pub fn validate(&self, warehouses_exist: bool) -> Result<ProductPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let sku = Sku::parse(&self.sku).ok();
        if sku.is_none() {
            errors.insert("sku", "El SKU es requerido");
        }
        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("nombre", "El nombre es requerido");
        }
        if self.category_id.is_none() {
            errors.insert("category_id", "La categoría es requerida");
        }
        if warehouses_exist && self.warehouse_id.is_none() {
            errors.insert("warehouse_id", "El almacén es requerido");
        }

        let min = threshold(&mut errors, "stock_minimo", "El stock mínimo", &self.min_stock);
        let max = threshold(&mut errors, "stock_maximo", "El stock máximo", &self.max_stock);
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                errors.insert("stock_minimo", "El stock mínimo no puede ser mayor al máximo");
            }
        }

        let (Some(sku), Some(category_id), Some(min_stock), Some(max_stock)) =
            (sku, self.category_id, min, max)
        else {
            return Err(errors);
        };
        errors.into_result(|| ProductPayload {
            sku: sku.to_string(),
            name: name.to_string(),
            category_id,
            warehouse_id: if warehouses_exist { self.warehouse_id } else { None },
            min_stock,
            max_stock,
        })
    }
}

fn threshold(errors: &mut FieldErrors, field: &'static str, subject: &str, raw: &str) -> Option<i64> {
    match parse_integer(raw) {
        IntegerInput::Empty => {
            errors.insert(field, format!("{subject} es requerido"));
            None
        }
        IntegerInput::NotInteger => {
            errors.insert(field, format!("{subject} debe ser un número entero"));
            None
        }
        IntegerInput::Value(v) if v < 0 => {
            errors.insert(field, format!("{subject} debe ser positivo"));
            None
        }
        IntegerInput::Value(v) => Some(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            sku: "SKU-001".into(),
            name: "Tornillo".into(),
            category_id: Some(CategoryId::new(1)),
            warehouse_id: Some(WarehouseId::new(2)),
            min_stock: "10".into(),
            max_stock: "50".into(),
        }
    }

    #[test]
    fn deserializes_api_row_with_labels() {
        let json = r#"{
            "id": 7, "sku": "SKU-7", "nombre": "Tuerca", "category_id": 3,
            "warehouse_id": null, "stock": 4, "stock_minimo": 5, "stock_maximo": 20,
            "created_at": "2024-05-01T10:00:00Z", "categoria": "Ferretería", "almacen": null
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.warehouse_id, None);
        assert_eq!(product.category_label.as_deref(), Some("Ferretería"));
        assert_eq!(product.display_label(), "Tuerca - SKU-7 (Stock: 4)");
    }

    #[test]
    fn valid_form_builds_payload() {
        let payload = valid_form().validate(true).unwrap();
        assert_eq!(payload.min_stock, 10);
        assert_eq!(payload.warehouse_id, Some(WarehouseId::new(2)));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["nombre"], "Tornillo");
        assert_eq!(json["stock_maximo"], 50);
    }

    #[test]
    fn collects_all_errors() {
        let form = ProductForm::default();
        let errors = form.validate(true).unwrap_err();
        for field in ["sku", "nombre", "category_id", "warehouse_id", "stock_minimo", "stock_maximo"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn warehouse_not_required_nor_sent_without_warehouses() {
        let mut form = valid_form();
        form.warehouse_id = None;
        let payload = form.validate(false).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("warehouse_id").is_none());
    }

    #[test]
    fn thresholds_must_be_ordered_non_negative_integers() {
        let mut form = valid_form();
        form.min_stock = "60".into();
        let errors = form.validate(true).unwrap_err();
        assert_eq!(errors.get("stock_minimo"), Some("El stock mínimo no puede ser mayor al máximo"));

        form.min_stock = "-1".into();
        form.max_stock = "2.5".into();
        let errors = form.validate(true).unwrap_err();
        assert_eq!(errors.get("stock_minimo"), Some("El stock mínimo debe ser positivo"));
        assert_eq!(errors.get("stock_maximo"), Some("El stock máximo debe ser un número entero"));
    }

    #[test]
    fn zero_thresholds_are_accepted() {
        let mut form = valid_form();
        form.min_stock = "0".into();
        form.max_stock = "0".into();
        assert!(form.validate(true).is_ok());
    }

    #[test]
    fn new_form_preselects_first_warehouse() {
        let warehouses = vec![
            Warehouse { id: WarehouseId::new(4), name: "Norte".into(), location: None },
            Warehouse { id: WarehouseId::new(9), name: "Sur".into(), location: None },
        ];
        assert_eq!(ProductForm::for_new(&warehouses).warehouse_id, Some(WarehouseId::new(4)));
        assert_eq!(ProductForm::for_new(&[]).warehouse_id, None);
    }

    #[test]
    fn search_matches_name_or_sku_case_insensitively() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 1, "sku": "ABC-1", "nombre": "Martillo", "category_id": 1,
            "stock": 1, "stock_minimo": 0, "stock_maximo": 5
        }))
        .unwrap();
        assert!(product.matches_search("mart"));
        assert!(product.matches_search("abc"));
        assert!(product.matches_search(""));
        assert!(!product.matches_search("clavo"));
    }
}
