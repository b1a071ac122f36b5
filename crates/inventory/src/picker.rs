//! Product selection field of the movement recorder.
//!
//! ```text
//! Idle --type--> Typing --select--> Selected
//!  ^               |  ^                |
//!  +----clear------+  +-----type-------+
//!  ^                                   |
//!  +------clear / warehouse change-----+
//! ```

use stockdesk_core::{DomainError, DomainResult, ProductId};

use crate::product::Product;
use crate::scope::{WarehouseSelection, product_visible};

/// Upper bound on suggestions shown under the search box.
pub const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PickerState {
    /// No search text.
    #[default]
    Idle,
    /// Search text present, suggestion list visible.
    Typing { query: String },
    /// A product is chosen; the search box shows its label.
    Selected { product_id: ProductId, label: String },
}

#[derive(Debug, Clone, Default)]
pub struct ProductPicker {
    state: PickerState,
    warehouse: WarehouseSelection,
}

impl ProductPicker {
    pub fn new(warehouse: WarehouseSelection) -> Self {
        Self { state: PickerState::Idle, warehouse }
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn warehouse(&self) -> WarehouseSelection {
        self.warehouse
    }

    /// Text currently shown in the search box.
    pub fn text(&self) -> &str {
        match &self.state {
            PickerState::Idle => "",
            PickerState::Typing { query } => query,
            PickerState::Selected { label, .. } => label,
        }
    }

    pub fn selected(&self) -> Option<ProductId> {
        match &self.state {
            PickerState::Selected { product_id, .. } => Some(*product_id),
            _ => None,
        }
    }

    /// The user edited the search box. Editing a selected label drops the
    /// selection; blank text returns to idle.
    pub fn type_text(&mut self, text: &str) {
        self.state = if text.trim().is_empty() {
            PickerState::Idle
        } else {
            PickerState::Typing { query: text.to_string() }
        };
    }

    /// Suggestions for the current query; empty unless typing.
    pub fn suggestions<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let PickerState::Typing { query } = &self.state else {
            return Vec::new();
        };
        products
            .iter()
            .filter(|p| product_visible(p, self.warehouse))
            .filter(|p| p.matches_search(query))
            .take(MAX_SUGGESTIONS)
            .collect()
    }

    /// Choose a product. Products outside the active warehouse filter cannot
    /// be selected.
    pub fn select(&mut self, product: &Product) -> DomainResult<()> {
        if !product_visible(product, self.warehouse) {
            return Err(DomainError::invariant(format!(
                "product {} is not stocked in the selected warehouse",
                product.id
            )));
        }
        self.state = PickerState::Selected {
            product_id: product.id,
            label: product.display_label(),
        };
        Ok(())
    }

    pub fn clear(&mut self) {
        self.state = PickerState::Idle;
    }

    /// Apply a new warehouse filter; any change resets the field to idle.
    pub fn set_warehouse(&mut self, warehouse: WarehouseSelection) {
        if warehouse != self.warehouse {
            self.warehouse = warehouse;
            self.state = PickerState::Idle;
        }
    }
}
