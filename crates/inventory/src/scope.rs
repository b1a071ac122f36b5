//! Warehouse scoping of categories and products.
//!
//! Categories may be global (no warehouse) and then show up under every
//! warehouse; products are never implicitly global. What an empty selection
//! means differs between screens, so callers name it with
//! [`NoSelectionPolicy`].

use serde::{Deserialize, Serialize};

use stockdesk_core::WarehouseId;

use crate::category::Category;
use crate::product::Product;
use crate::warehouse::Warehouse;

/// The warehouse filter currently applied by a screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarehouseSelection {
    /// No warehouse chosen.
    #[default]
    All,
    Only(WarehouseId),
}

impl WarehouseSelection {
    pub fn warehouse_id(&self) -> Option<WarehouseId> {
        match self {
            WarehouseSelection::All => None,
            WarehouseSelection::Only(id) => Some(*id),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, WarehouseSelection::Only(_))
    }
}

impl From<Option<WarehouseId>> for WarehouseSelection {
    fn from(value: Option<WarehouseId>) -> Self {
        value.map_or(WarehouseSelection::All, WarehouseSelection::Only)
    }
}

/// What a category list shows while no warehouse is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoSelectionPolicy {
    /// Nothing until a warehouse is chosen (forces the user to scope first).
    ShowNothing,
    /// The full, unfiltered list.
    #[default]
    ShowAll,
}

/// Whether `category` belongs in a list filtered by `selection`.
pub fn category_visible(
    category: &Category,
    selection: WarehouseSelection,
    policy: NoSelectionPolicy,
) -> bool {
    match selection {
        WarehouseSelection::All => policy == NoSelectionPolicy::ShowAll,
        WarehouseSelection::Only(id) => {
            category.warehouse_id.is_none() || category.warehouse_id == Some(id)
        }
    }
}

pub fn visible_categories(
    categories: &[Category],
    selection: WarehouseSelection,
    policy: NoSelectionPolicy,
) -> Vec<&Category> {
    categories
        .iter()
        .filter(|c| category_visible(c, selection, policy))
        .collect()
}

/// Whether `product` belongs in a list filtered by `selection`.
///
/// Products without a warehouse are hidden as soon as one is selected.
pub fn product_visible(product: &Product, selection: WarehouseSelection) -> bool {
    match selection {
        WarehouseSelection::All => true,
        WarehouseSelection::Only(id) => product.warehouse_id == Some(id),
    }
}

pub fn visible_products(products: &[Product], selection: WarehouseSelection) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| product_visible(p, selection))
        .collect()
}

/// How the warehouse selector is presented for a given set of warehouses.
///
/// With a single warehouse there is nothing to choose: it is selected
/// automatically and the control is not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorMode {
    Hidden { auto_selected: Option<WarehouseId> },
    Visible,
}

impl SelectorMode {
    pub fn for_warehouses(warehouses: &[Warehouse]) -> Self {
        match warehouses {
            [] => SelectorMode::Hidden { auto_selected: None },
            [only] => SelectorMode::Hidden { auto_selected: Some(only.id) },
            _ => SelectorMode::Visible,
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, SelectorMode::Visible)
    }

    /// The selection actually in force given what the user picked.
    ///
    /// A hidden selector overrides the user's choice, which may be stale from
    /// before warehouses were reloaded.
    pub fn effective_selection(&self, choice: WarehouseSelection) -> WarehouseSelection {
        match self {
            SelectorMode::Hidden { auto_selected } => (*auto_selected).into(),
            SelectorMode::Visible => choice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdesk_core::{CategoryId, ProductId};

    fn category(id: i64, warehouse: Option<i64>) -> Category {
        Category {
            id: CategoryId::new(id),
            name: format!("cat-{id}"),
            warehouse_id: warehouse.map(WarehouseId::new),
        }
    }

    fn product(id: i64, warehouse: Option<i64>) -> Product {
        Product {
            id: ProductId::new(id),
            sku: format!("SKU-{id}"),
            name: format!("prod-{id}"),
            category_id: None,
            warehouse_id: warehouse.map(WarehouseId::new),
            stock: 0,
            min_stock: 0,
            max_stock: 0,
            created_at: None,
            category_label: None,
            warehouse_label: None,
        }
    }

    fn warehouse(id: i64) -> Warehouse {
        Warehouse { id: WarehouseId::new(id), name: format!("wh-{id}"), location: None }
    }

    #[test]
    fn global_category_visible_under_every_warehouse() {
        let global = category(1, None);
        for id in 1..5 {
            let selection = WarehouseSelection::Only(WarehouseId::new(id));
            assert!(category_visible(&global, selection, NoSelectionPolicy::ShowNothing));
            assert!(category_visible(&global, selection, NoSelectionPolicy::ShowAll));
        }
        assert!(category_visible(&global, WarehouseSelection::All, NoSelectionPolicy::ShowAll));
    }

    #[test]
    fn scoped_category_only_under_its_warehouse() {
        let scoped = category(2, Some(7));
        let policy = NoSelectionPolicy::ShowNothing;
        assert!(category_visible(&scoped, WarehouseSelection::Only(WarehouseId::new(7)), policy));
        assert!(!category_visible(&scoped, WarehouseSelection::Only(WarehouseId::new(8)), policy));
    }

    #[test]
    fn no_selection_follows_policy() {
        let categories = vec![category(1, None), category(2, Some(7))];
        assert!(
            visible_categories(&categories, WarehouseSelection::All, NoSelectionPolicy::ShowNothing)
                .is_empty()
        );
        assert_eq!(
            visible_categories(&categories, WarehouseSelection::All, NoSelectionPolicy::ShowAll).len(),
            2
        );
    }

    #[test]
    fn unscoped_products_hidden_once_a_warehouse_is_selected() {
        let products = vec![product(1, Some(7)), product(2, None), product(3, Some(8))];
        let visible = visible_products(&products, WarehouseSelection::Only(WarehouseId::new(7)));
        assert_eq!(visible.iter().map(|p| p.id.get()).collect::<Vec<_>>(), vec![1]);
        assert_eq!(visible_products(&products, WarehouseSelection::All).len(), 3);
    }

    #[test]
    fn single_warehouse_is_auto_selected_and_selector_hidden() {
        let mode = SelectorMode::for_warehouses(&[warehouse(5)]);
        assert!(!mode.is_visible());
        assert_eq!(
            mode.effective_selection(WarehouseSelection::All),
            WarehouseSelection::Only(WarehouseId::new(5))
        );
        // A stale choice from before the reload is ignored.
        assert_eq!(
            mode.effective_selection(WarehouseSelection::Only(WarehouseId::new(99))),
            WarehouseSelection::Only(WarehouseId::new(5))
        );
    }

    #[test]
    fn selector_hidden_without_warehouses_and_visible_with_several() {
        let none = SelectorMode::for_warehouses(&[]);
        assert!(!none.is_visible());
        assert_eq!(none.effective_selection(WarehouseSelection::All), WarehouseSelection::All);

        let many = SelectorMode::for_warehouses(&[warehouse(1), warehouse(2)]);
        assert!(many.is_visible());
        let choice = WarehouseSelection::Only(WarehouseId::new(2));
        assert_eq!(many.effective_selection(choice), choice);
    }
}
