//! `stockdesk-core`: shared building blocks for the inventory client.
//!
//! Pure types only: no HTTP, no storage, no UI state.

pub mod entity;
pub mod error;
pub mod id;
pub mod validation;
pub mod value_object;

pub use entity::{Entity, find_by_id};
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, MovementId, ProductId, UserId, WarehouseId};
pub use validation::{FieldErrors, IntegerInput, parse_integer};
pub use value_object::{Email, Sku, ValueObject};
