//! Inventory domain module.
//!
//! Records as the API serves them, plus the rules the client applies to
//! them before anything reaches the network: stock classification, form
//! validation, warehouse scoping and product selection. Deterministic logic
//! only (no IO, no HTTP, no storage).

pub mod category;
pub mod movement;
pub mod picker;
pub mod product;
pub mod scope;
pub mod search;
pub mod stock;
pub mod warehouse;

pub use category::{Category, CategoryForm, CategoryPayload};
pub use movement::{Movement, MovementForm, MovementPayload, MovementType, validate_movement};
pub use picker::{PickerState, ProductPicker};
pub use product::{Product, ProductForm, ProductPayload};
pub use scope::{
    NoSelectionPolicy, SelectorMode, WarehouseSelection, category_visible, product_visible,
    visible_categories, visible_products,
};
pub use search::filter_products;
pub use stock::{StockLevels, StockStatus, StockSummary, classify, low_stock};
pub use warehouse::{Warehouse, WarehouseForm, WarehousePayload};
