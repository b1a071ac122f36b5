use serde::{Deserialize, Serialize};

use stockdesk_core::{Entity, FieldErrors, WarehouseId};

/// A warehouse (physical stock location).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ubicacion", default)]
    pub location: Option<String>,
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> WarehouseId {
        self.id
    }
}

/// Body of `POST /warehouses` and `PUT /warehouses/{id}`.
///
/// A blank location is sent as `null` so editing can clear it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarehousePayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ubicacion")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarehouseForm {
    pub name: String,
    pub location: String,
}

impl WarehouseForm {
    pub fn for_edit(warehouse: &Warehouse) -> Self {
        Self {
            name: warehouse.name.clone(),
            location: warehouse.location.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<WarehousePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("nombre", "El nombre es requerido");
        }
        let location = self.location.trim();
        errors.into_result(|| WarehousePayload {
            name: name.to_string(),
            location: (!location.is_empty()).then(|| location.to_string()),
        })
    }
}
