//! Explicit confirmation of destructive actions.
//!
//! The API client's delete methods take a [`Confirmed`] id, which can only be
//! obtained by answering a [`Confirmation`] prompt.

use stockdesk_auth::User;
use stockdesk_core::{CategoryId, ProductId, UserId, WarehouseId};
use stockdesk_inventory::{Category, Product, Warehouse};

/// A pending yes/no question about deleting one record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a confirmation does nothing until it is answered"]
pub struct Confirmation<Id> {
    id: Id,
    prompt: String,
}

/// An id the user agreed to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmed<Id>(Id);

impl<Id: Copy> Confirmed<Id> {
    pub fn id(&self) -> Id {
        self.0
    }
}

impl<Id: Copy> Confirmation<Id> {
    pub fn id(&self) -> Id {
        self.id
    }

    /// Question to show the user.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// `Some` only for an affirmative answer.
    pub fn answer(self, yes: bool) -> Option<Confirmed<Id>> {
        yes.then_some(Confirmed(self.id))
    }

    /// Accept without asking (`--yes` on the command line).
    pub fn accept(self) -> Confirmed<Id> {
        Confirmed(self.id)
    }
}

impl Confirmation<ProductId> {
    pub fn delete_product(product: &Product) -> Self {
        Self {
            id: product.id,
            prompt: format!("¿Estás seguro de eliminar el producto \"{}\"?", product.name),
        }
    }
}

impl Confirmation<CategoryId> {
    pub fn delete_category(category: &Category) -> Self {
        Self {
            id: category.id,
            prompt: format!("¿Estás seguro de eliminar la categoría \"{}\"?", category.name),
        }
    }
}

impl Confirmation<WarehouseId> {
    pub fn delete_warehouse(warehouse: &Warehouse) -> Self {
        Self {
            id: warehouse.id,
            prompt: format!("¿Estás seguro de eliminar el almacén \"{}\"?", warehouse.name),
        }
    }
}

impl Confirmation<UserId> {
    pub fn delete_user(user: &User) -> Self {
        Self {
            id: user.id,
            prompt: format!("¿Estás seguro de eliminar al usuario \"{}\"?", user.name),
        }
    }
}

/// Interpret a typed answer: `s`, `si`, `sí`, `y`, `yes` (any case) mean yes.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        serde_json::from_value(serde_json::json!({
            "id": 9, "sku": "A-1", "nombre": "Tornillo", "stock": 1,
            "stock_minimo": 0, "stock_maximo": 5
        }))
        .unwrap()
    }

    #[test]
    fn prompt_names_the_record() {
        let confirmation = Confirmation::delete_product(&product());
        assert_eq!(
            confirmation.prompt(),
            "¿Estás seguro de eliminar el producto \"Tornillo\"?"
        );
        assert_eq!(confirmation.id(), ProductId::new(9));
    }

    #[test]
    fn only_a_yes_confirms() {
        assert_eq!(Confirmation::delete_product(&product()).answer(false), None);
        let confirmed = Confirmation::delete_product(&product()).answer(true).unwrap();
        assert_eq!(confirmed.id(), ProductId::new(9));
    }

    #[test]
    fn typed_answers() {
        for yes in ["s", "Sí", " YES "] {
            assert!(is_affirmative(yes));
        }
        for no in ["", "n", "no", "quizá"] {
            assert!(!is_affirmative(no));
        }
    }
}
