use serde::{Deserialize, Serialize};

use stockdesk_core::{CategoryId, Entity, FieldErrors, WarehouseId};

/// A product category.
///
/// `warehouse_id == None` marks a global category, visible under every
/// warehouse (see [`crate::scope`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub warehouse_id: Option<WarehouseId>,
}

impl Category {
    pub fn is_global(&self) -> bool {
        self.warehouse_id.is_none()
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
        self.id
    }
}

/// Body of `POST /categories` and `PUT /categories/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    pub warehouse_id: Option<WarehouseId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub warehouse_id: Option<WarehouseId>,
}

impl CategoryForm {
    pub fn for_edit(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            warehouse_id: category.warehouse_id,
        }
    }

    pub fn validate(&self) -> Result<CategoryPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("nombre", "El nombre es requerido");
        }
        errors.into_result(|| CategoryPayload {
            name: name.to_string(),
            warehouse_id: self.warehouse_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_warehouse_means_global() {
        let category: Category =
            serde_json::from_str(r#"{"id": 1, "nombre": "General", "warehouse_id": null}"#).unwrap();
        assert!(category.is_global());

        let category: Category = serde_json::from_str(r#"{"id": 2, "nombre": "Frío"}"#).unwrap();
        assert!(category.is_global());
    }

    #[test]
    fn blank_name_is_rejected() {
        let form = CategoryForm { name: "   ".into(), warehouse_id: None };
        assert!(form.validate().unwrap_err().contains("nombre"));
    }
}
