//! Product catalog screen.

use tracing::{info, warn};

use stockdesk_auth::{Permission, TokenStorage};
use stockdesk_core::{CategoryId, FieldErrors, ProductId, WarehouseId, find_by_id};
use stockdesk_inventory::{
    Category, NoSelectionPolicy, Product, ProductForm, SelectorMode, Warehouse,
    WarehouseSelection, category_visible, visible_categories,
};

use super::{Editor, Messages, Notices, report_failure, report_load_failure};
use crate::api::{CategoryFilter, ProductFilter};
use crate::confirm::{Confirmation, Confirmed};
use crate::error::{ApiError, SubmitError};
use crate::query::{Applied, ListQuery};
use crate::session::Session;
use crate::submit::SubmitGuard;

const MESSAGES: Messages = Messages {
    created: "Producto creado exitosamente",
    updated: "Producto actualizado exitosamente",
    deleted: "Producto eliminado exitosamente",
    load_failed: "Error al cargar los datos",
    save_failed: "Error al guardar el producto",
    delete_failed: "Error al eliminar el producto",
};

const CATEGORY_OUT_OF_SCOPE: &str = "La categoría no corresponde al almacén seleccionado";

pub struct ProductsPage {
    warehouses: Vec<Warehouse>,
    categories: Vec<Category>,
    products: ListQuery<ProductFilter, Product>,
    selection: WarehouseSelection,
    search: String,
    editor: Option<Editor<ProductId, ProductForm>>,
    guard: SubmitGuard,
    pub notices: Notices,
}

impl Default for ProductsPage {
    fn default() -> Self {
        Self {
            warehouses: Vec::new(),
            categories: Vec::new(),
            products: ListQuery::new("products"),
            selection: WarehouseSelection::All,
            search: String::new(),
            editor: None,
            guard: SubmitGuard::new(),
            notices: Notices::default(),
        }
    }
}

impl ProductsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        self.products.rows()
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_loading(&self) -> bool {
        self.products.is_loading()
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn selector_mode(&self) -> SelectorMode {
        SelectorMode::for_warehouses(&self.warehouses)
    }

    /// Warehouse filter in force (auto-selected when only one exists).
    pub fn selection(&self) -> WarehouseSelection {
        self.selector_mode().effective_selection(self.selection)
    }

    pub fn filter(&self) -> ProductFilter {
        let search = self.search.trim();
        ProductFilter {
            warehouse: self.selection(),
            category: None,
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }

    /// Load warehouses and categories, then the product list.
    pub async fn load<S: TokenStorage>(&mut self, session: &mut Session<S>) -> Result<(), ApiError> {
        let api = session.api();
        let all_categories = CategoryFilter::default();
        let (warehouses, categories) =
            tokio::join!(api.list_warehouses(), api.list_categories(&all_categories));
        let warehouses = session.observe(warehouses);
        let categories = session.observe(categories);

        match (warehouses, categories) {
            (Ok(warehouses), Ok(categories)) => {
                self.warehouses = warehouses;
                self.categories = categories;
            }
            (Err(err), _) | (_, Err(err)) => {
                report_load_failure(&mut self.notices, &err, MESSAGES.load_failed);
                return Err(err);
            }
        }
        self.fetch(session, true).await
    }

    pub async fn select_warehouse<S: TokenStorage>(
        &mut self,
        session: &mut Session<S>,
        selection: WarehouseSelection,
    ) -> Result<(), ApiError> {
        self.selection = selection;
        self.fetch(session, false).await
    }

    /// Server-side search; a blank term lists everything again.
    pub async fn search<S: TokenStorage>(
        &mut self,
        session: &mut Session<S>,
        term: &str,
    ) -> Result<(), ApiError> {
        self.search = term.to_string();
        self.fetch(session, false).await
    }

    async fn fetch<S: TokenStorage>(
        &mut self,
        session: &mut Session<S>,
        force: bool,
    ) -> Result<(), ApiError> {
        let filter = self.filter();
        let issued = match self.products.request(filter) {
            Some(issued) => Some(issued),
            None if force => self.products.reload(),
            None => None,
        };
        let Some((ticket, filter)) = issued else {
            return Ok(());
        };

        let result = session.api().list_products(&filter).await;
        let result = session.observe(result);
        match self.products.apply(ticket, result) {
            Applied::Failed(err) => {
                report_load_failure(&mut self.notices, &err, MESSAGES.load_failed);
                Err(err)
            }
            _ => Ok(()),
        }
    }

    pub fn editor(&self) -> Option<&Editor<ProductId, ProductForm>> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut Editor<ProductId, ProductForm>> {
        self.editor.as_mut()
    }

    pub fn open_create(&mut self) {
        self.editor = Some(Editor::create(ProductForm::for_new(&self.warehouses)));
    }

    pub fn open_edit(&mut self, id: ProductId) -> bool {
        match find_by_id(self.products.rows(), id) {
            Some(product) => {
                self.editor = Some(Editor::edit(id, ProductForm::for_edit(product)));
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.editor = None;
    }

    fn form_policy(&self) -> NoSelectionPolicy {
        if self.warehouses.is_empty() {
            NoSelectionPolicy::ShowAll
        } else {
            NoSelectionPolicy::ShowNothing
        }
    }

    /// Category options for the open form, scoped by the form's warehouse.
    pub fn form_categories(&self) -> Vec<&Category> {
        let Some(editor) = &self.editor else {
            return Vec::new();
        };
        visible_categories(&self.categories, editor.form.warehouse_id.into(), self.form_policy())
    }

    /// Change the form's warehouse, dropping a category that no longer applies.
    pub fn set_form_warehouse(&mut self, warehouse: Option<WarehouseId>) {
        let policy = self.form_policy();
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        editor.form.warehouse_id = warehouse;
        editor.touch("warehouse_id");
        let still_visible = editor
            .form
            .category_id
            .and_then(|id| find_by_id(&self.categories, id))
            .is_some_and(|c| category_visible(c, warehouse.into(), policy));
        if !still_visible {
            editor.form.category_id = None;
        }
    }

    /// Whether the form's category may be used with the form's warehouse.
    /// An unset category is left to form validation.
    pub fn form_category_in_scope(&self) -> bool {
        let Some(form) = self.editor.as_ref().map(|e| &e.form) else {
            return true;
        };
        let Some(id) = form.category_id else {
            return true;
        };
        find_by_id(&self.categories, id)
            .is_some_and(|c| category_visible(c, form.warehouse_id.into(), self.form_policy()))
    }

    /// Set the form's category. One outside the form's warehouse is kept
    /// but flagged, and `submit` refuses it.
    pub fn set_form_category(&mut self, category: Option<CategoryId>) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        editor.form.category_id = category;
        editor.touch("category_id");
        if !self.form_category_in_scope() {
            if let Some(editor) = self.editor.as_mut() {
                editor.errors.insert("category_id", CATEGORY_OUT_OF_SCOPE);
            }
        }
    }

    pub async fn submit<S: TokenStorage>(
        &mut self,
        session: &mut Session<S>,
    ) -> Result<(), SubmitError> {
        session.authorize(&Permission::PRODUCTS_WRITE)?;
        let permit = self.guard.try_acquire().ok_or(SubmitError::Busy)?;
        let warehouses_exist = !self.warehouses.is_empty();
        let category_in_scope = self.form_category_in_scope();
        let editor = self.editor.as_mut().ok_or(SubmitError::NoForm)?;

        let validated = match (editor.form.validate(warehouses_exist), category_in_scope) {
            (result, true) => result,
            (Ok(_), false) => Err(FieldErrors::single("category_id", CATEGORY_OUT_OF_SCOPE)),
            (Err(mut errors), false) => {
                errors.insert("category_id", CATEGORY_OUT_OF_SCOPE);
                Err(errors)
            }
        };
        let payload = match validated {
            Ok(payload) => payload,
            Err(errors) => {
                editor.errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
        };
        let editing = editor.editing;

        let result = match editing {
            Some(id) => session.api().update_product(id, &payload).await,
            None => session.api().create_product(&payload).await,
        };
        match session.observe(result) {
            Ok(_) => {
                info!(sku = %payload.sku, "product saved");
                self.notices.success(if editing.is_some() { MESSAGES.updated } else { MESSAGES.created });
                self.editor = None;
                drop(permit);
                if let Err(err) = self.fetch(session, true).await {
                    warn!(error = %err, "product list not refreshed after save");
                }
                Ok(())
            }
            Err(err) => Err(report_failure(
                self.editor.as_mut().map(|e| &mut e.errors),
                &mut self.notices,
                err,
                MESSAGES.save_failed,
            )),
        }
    }

    pub fn confirm_delete(&self, id: ProductId) -> Option<Confirmation<ProductId>> {
        find_by_id(self.products.rows(), id).map(Confirmation::delete_product)
    }

    pub async fn delete<S: TokenStorage>(
        &mut self,
        session: &mut Session<S>,
        confirmed: Confirmed<ProductId>,
    ) -> Result<(), SubmitError> {
        session.authorize(&Permission::PRODUCTS_WRITE)?;
        let result = session.api().delete_product(confirmed).await;
        match session.observe(result) {
            Ok(_) => {
                info!(product_id = %confirmed.id(), "product deleted");
                self.notices.success(MESSAGES.deleted);
                if let Err(err) = self.fetch(session, true).await {
                    warn!(error = %err, "product list not refreshed after delete");
                }
                Ok(())
            }
            Err(err) => Err(report_failure(None, &mut self.notices, err, MESSAGES.delete_failed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse(id: i64) -> Warehouse {
        Warehouse { id: WarehouseId::new(id), name: format!("W{id}"), location: None }
    }

    fn category(id: i64, warehouse: Option<i64>) -> Category {
        Category {
            id: CategoryId::new(id),
            name: format!("C{id}"),
            warehouse_id: warehouse.map(WarehouseId::new),
        }
    }

    fn page(warehouses: Vec<Warehouse>) -> ProductsPage {
        ProductsPage {
            warehouses,
            categories: vec![category(1, None), category(9, Some(2))],
            ..ProductsPage::default()
        }
    }

    fn option_ids(page: &ProductsPage) -> Vec<i64> {
        page.form_categories().iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn form_without_warehouses_offers_every_category() {
        let mut page = page(Vec::new());
        assert_eq!(page.form_policy(), NoSelectionPolicy::ShowAll);
        assert!(page.form_categories().is_empty());

        page.open_create();
        assert_eq!(page.editor().unwrap().form.warehouse_id, None);
        assert_eq!(option_ids(&page), vec![1, 9]);
    }

    #[test]
    fn form_categories_follow_the_form_warehouse() {
        let mut page = page(vec![warehouse(1), warehouse(2)]);
        assert_eq!(page.form_policy(), NoSelectionPolicy::ShowNothing);

        page.open_create();
        assert_eq!(page.editor().unwrap().form.warehouse_id, Some(WarehouseId::new(1)));
        assert_eq!(option_ids(&page), vec![1]);

        page.set_form_warehouse(Some(WarehouseId::new(2)));
        assert_eq!(option_ids(&page), vec![1, 9]);

        page.set_form_warehouse(None);
        assert!(page.form_categories().is_empty());
    }

    #[test]
    fn switching_warehouse_drops_a_scoped_category() {
        let mut page = page(vec![warehouse(1), warehouse(2)]);
        page.open_create();
        page.set_form_warehouse(Some(WarehouseId::new(2)));
        page.set_form_category(Some(CategoryId::new(9)));
        assert!(page.form_category_in_scope());

        page.set_form_warehouse(Some(WarehouseId::new(1)));
        assert_eq!(page.editor().unwrap().form.category_id, None);

        page.set_form_category(Some(CategoryId::new(1)));
        page.set_form_warehouse(Some(WarehouseId::new(2)));
        assert_eq!(page.editor().unwrap().form.category_id, Some(CategoryId::new(1)));
    }

    #[test]
    fn category_from_another_warehouse_is_flagged() {
        let mut page = page(vec![warehouse(1), warehouse(2)]);
        page.open_create();
        page.set_form_category(Some(CategoryId::new(9)));

        assert!(!page.form_category_in_scope());
        let errors = &page.editor().unwrap().errors;
        assert_eq!(errors.get("category_id"), Some(CATEGORY_OUT_OF_SCOPE));

        page.set_form_category(Some(CategoryId::new(1)));
        assert!(page.form_category_in_scope());
        assert!(page.editor().unwrap().errors.is_empty());
    }

    #[test]
    fn unknown_category_is_out_of_scope() {
        let mut page = page(vec![warehouse(1)]);
        page.open_create();
        page.set_form_category(Some(CategoryId::new(42)));
        assert!(!page.form_category_in_scope());
    }
}
