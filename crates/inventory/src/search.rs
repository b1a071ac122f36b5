//! Free-text narrowing of already loaded lists.

use crate::product::Product;

/// Products whose name or SKU contains `term` (case-insensitive).
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| p.matches_search(term)).collect()
}
