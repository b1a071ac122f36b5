//! Stock movements: the immutable entry/exit log and its registration form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockdesk_core::{
    DomainError, Entity, FieldErrors, IntegerInput, MovementId, ProductId, find_by_id,
    parse_integer,
};

use crate::product::Product;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Stock entry (increase).
    #[default]
    Entrada,
    /// Stock exit (decrease).
    Salida,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Entrada => "entrada",
            MovementType::Salida => "salida",
        }
    }

    /// Stock after applying a movement of `quantity` units.
    ///
    /// Advisory only: the API recomputes this and its answer is what gets
    /// displayed once the movement is confirmed.
    pub fn apply(&self, stock_before: i64, quantity: i64) -> i64 {
        match self {
            MovementType::Entrada => stock_before.saturating_add(quantity),
            MovementType::Salida => stock_before.saturating_sub(quantity),
        }
    }
}

impl core::fmt::Display for MovementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for MovementType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entrada" => Ok(MovementType::Entrada),
            "salida" => Ok(MovementType::Salida),
            other => Err(DomainError::validation(format!("unknown movement type '{other}'"))),
        }
    }
}

/// A registered movement as listed by `GET /movements`.
///
/// Movements are log entries: once created they are never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    #[serde(rename = "tipo_movimiento")]
    pub kind: MovementType,
    pub product_id: ProductId,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "nota", default)]
    pub note: Option<String>,
    #[serde(rename = "stock_anterior")]
    pub stock_before: i64,
    #[serde(rename = "stock_actual")]
    pub stock_after: i64,
    #[serde(rename = "usuario", default)]
    pub user_label: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "producto", default)]
    pub product_label: Option<String>,
    #[serde(rename = "almacen", default)]
    pub warehouse_label: Option<String>,
}

impl Entity for Movement {
    type Id = MovementId;

    fn id(&self) -> MovementId {
        self.id
    }
}

/// Body of `POST /movements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementPayload {
    #[serde(rename = "tipo_movimiento")]
    pub kind: MovementType,
    pub product_id: ProductId,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "nota", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MovementPayload {
    /// Stock the product would have after this movement.
    pub fn projected_stock(&self, stock_before: i64) -> i64 {
        self.kind.apply(stock_before, self.quantity)
    }
}

/// Raw input of the "register movement" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementForm {
    pub kind: MovementType,
    pub product_id: Option<ProductId>,
    pub quantity: String,
    pub note: String,
}

impl MovementForm {
    /// Validate against the loaded product list, resolving the selected product.
    pub fn validate_against(&self, products: &[Product]) -> Result<MovementPayload, FieldErrors> {
        let selected = self.product_id.and_then(|id| find_by_id(products, id));
        validate_movement(self, selected)
    }
}

/// Validate a movement form.
///
/// Every check runs and all failures are reported together:
/// - a product must be chosen;
/// - the quantity must be a whole number greater than zero;
/// - an exit may not take more than the selected product's stock (the
///   message names the available amount).
///
/// When `selected` is `None` the stock check is skipped; the API re-validates
/// it anyway.
pub fn validate_movement(
    form: &MovementForm,
    selected: Option<&Product>,
) -> Result<MovementPayload, FieldErrors> {
    let mut errors = FieldErrors::new();

    if form.product_id.is_none() {
        errors.insert("product_id", "Selecciona un producto");
    }

    let quantity = match parse_integer(&form.quantity) {
        IntegerInput::Empty => {
            errors.insert("cantidad", "La cantidad es requerida");
            None
        }
        IntegerInput::NotInteger => {
            errors.insert("cantidad", "La cantidad debe ser un número entero");
            None
        }
        IntegerInput::Value(v) if v <= 0 => {
            errors.insert("cantidad", "La cantidad debe ser mayor a 0");
            None
        }
        IntegerInput::Value(v) => Some(v),
    };

    if let (MovementType::Salida, Some(product), Some(quantity)) = (form.kind, selected, quantity) {
        if quantity > product.stock {
            errors.insert(
                "cantidad",
                format!("Stock insuficiente. Disponible: {}", product.stock),
            );
        }
    }

    let (Some(product_id), Some(quantity)) = (form.product_id, quantity) else {
        return Err(errors);
    };

    let note = form.note.trim();
    errors.into_result(|| MovementPayload {
        kind: form.kind,
        product_id,
        quantity,
        note: (!note.is_empty()).then(|| note.to_string()),
    })
}
