use stockdesk_core::{CategoryId, ProductId};
use stockdesk_inventory::WarehouseSelection;

use super::Query;

fn push_warehouse(query: &mut Query, warehouse: WarehouseSelection) {
    if let Some(id) = warehouse.warehouse_id() {
        query.push(("warehouse_id", id.to_string()));
    }
}

/// Query of `GET /products`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductFilter {
    pub warehouse: WarehouseSelection,
    pub category: Option<CategoryId>,
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn in_warehouse(warehouse: WarehouseSelection) -> Self {
        Self { warehouse, ..Self::default() }
    }

    pub(crate) fn query(&self) -> Query {
        let mut query = Query::new();
        push_warehouse(&mut query, self.warehouse);
        if let Some(id) = self.category {
            query.push(("category_id", id.to_string()));
        }
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query.push(("search", term.to_string()));
        }
        query
    }
}

/// Query of `GET /categories`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CategoryFilter {
    pub warehouse: WarehouseSelection,
}

impl CategoryFilter {
    pub(crate) fn query(&self) -> Query {
        let mut query = Query::new();
        push_warehouse(&mut query, self.warehouse);
        query
    }
}

/// Query of `GET /movements`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MovementFilter {
    pub warehouse: WarehouseSelection,
    pub product: Option<ProductId>,
}

impl MovementFilter {
    pub(crate) fn query(&self) -> Query {
        let mut query = Query::new();
        push_warehouse(&mut query, self.warehouse);
        if let Some(id) = self.product {
            query.push(("product_id", id.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdesk_core::WarehouseId;

    #[test]
    fn empty_filter_sends_nothing() {
        assert!(ProductFilter::default().query().is_empty());
        assert!(MovementFilter::default().query().is_empty());
    }

    #[test]
    fn product_filter_skips_blank_search() {
        let filter = ProductFilter {
            warehouse: WarehouseSelection::Only(WarehouseId::new(2)),
            category: Some(CategoryId::new(5)),
            search: Some("   ".into()),
        };
        assert_eq!(
            filter.query(),
            vec![("warehouse_id", "2".to_string()), ("category_id", "5".to_string())]
        );
    }
}
