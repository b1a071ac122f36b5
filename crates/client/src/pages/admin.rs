//! Catalog and account management screens (administrators only).
//!
//! Categories, warehouses and users share one flow: list, open a form,
//! submit, confirm and delete. [`AdminResource`] describes what differs.

use std::future::Future;

use serde_json::Value;
use tracing::{info, warn};

use stockdesk_auth::{Permission, TokenStorage, User, UserForm, UserPayload};
use stockdesk_core::{Entity, FieldErrors, find_by_id};
use stockdesk_inventory::{
    Category, CategoryForm, CategoryPayload, Warehouse, WarehouseForm, WarehousePayload,
};

use super::{Editor, Messages, Notices, report_failure, report_load_failure};
use crate::api::{ApiClient, CategoryFilter};
use crate::confirm::{Confirmation, Confirmed};
use crate::error::{ApiError, SubmitError};
use crate::query::{Applied, ListQuery};
use crate::session::Session;
use crate::submit::SubmitGuard;

type IdOf<R> = <<R as AdminResource>::Row as Entity>::Id;

pub trait AdminResource: Sized {
    type Row: Entity + Clone;
    type Form: Clone + Default;
    type Payload: Send + Sync;

    const NAME: &'static str;
    const MESSAGES: Messages;

    fn permission() -> Permission;
    fn form_for(row: &Self::Row) -> Self::Form;
    fn validate(form: &Self::Form) -> Result<Self::Payload, FieldErrors>;
    fn confirmation(row: &Self::Row) -> Confirmation<IdOf<Self>>;

    fn list(api: &ApiClient) -> impl Future<Output = Result<Vec<Self::Row>, ApiError>> + Send;
    fn create(
        api: &ApiClient,
        payload: &Self::Payload,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;
    fn update(
        api: &ApiClient,
        id: IdOf<Self>,
        payload: &Self::Payload,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;
    fn delete(
        api: &ApiClient,
        id: Confirmed<IdOf<Self>>,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

pub struct AdminPage<R: AdminResource> {
    rows: ListQuery<(), R::Row>,
    editor: Option<Editor<IdOf<R>, R::Form>>,
    guard: SubmitGuard,
    pub notices: Notices,
}

impl<R: AdminResource> Default for AdminPage<R> {
    fn default() -> Self {
        Self {
            rows: ListQuery::new(R::NAME),
            editor: None,
            guard: SubmitGuard::new(),
            notices: Notices::default(),
        }
    }
}

impl<R: AdminResource> AdminPage<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[R::Row] {
        self.rows.rows()
    }

    pub fn is_loading(&self) -> bool {
        self.rows.is_loading()
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn editor(&self) -> Option<&Editor<IdOf<R>, R::Form>> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut Editor<IdOf<R>, R::Form>> {
        self.editor.as_mut()
    }

    pub async fn load<S: TokenStorage>(&mut self, session: &mut Session<S>) -> Result<(), ApiError> {
        let Some((ticket, ())) = self.rows.request(()).or_else(|| self.rows.reload()) else {
            return Ok(());
        };
        let result = R::list(session.api()).await;
        let result = session.observe(result);
        match self.rows.apply(ticket, result) {
            Applied::Failed(err) => {
                report_load_failure(&mut self.notices, &err, R::MESSAGES.load_failed);
                Err(err)
            }
            _ => Ok(()),
        }
    }

    pub fn open_create(&mut self) {
        self.editor = Some(Editor::create(R::Form::default()));
    }

    /// Open the form for an existing row; `false` if the id is not loaded.
    pub fn open_edit(&mut self, id: IdOf<R>) -> bool {
        match find_by_id(self.rows.rows(), id) {
            Some(row) => {
                self.editor = Some(Editor::edit(id, R::form_for(row)));
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.editor = None;
    }

    pub async fn submit<S: TokenStorage>(
        &mut self,
        session: &mut Session<S>,
    ) -> Result<(), SubmitError> {
        session.authorize(&R::permission())?;
        let permit = self.guard.try_acquire().ok_or(SubmitError::Busy)?;
        let editor = self.editor.as_mut().ok_or(SubmitError::NoForm)?;

        let payload = match R::validate(&editor.form) {
            Ok(payload) => payload,
            Err(errors) => {
                editor.errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
        };
        let editing = editor.editing;

        let result = match editing {
            Some(id) => R::update(session.api(), id, &payload).await,
            None => R::create(session.api(), &payload).await,
        };

        match session.observe(result) {
            Ok(_) => {
                let message = if editing.is_some() {
                    R::MESSAGES.updated
                } else {
                    R::MESSAGES.created
                };
                info!(resource = R::NAME, "saved");
                self.notices.success(message);
                self.editor = None;
                drop(permit);
                if let Err(err) = self.load(session).await {
                    warn!(resource = R::NAME, error = %err, "list not refreshed after save");
                }
                Ok(())
            }
            Err(err) => Err(report_failure(
                self.editor.as_mut().map(|e| &mut e.errors),
                &mut self.notices,
                err,
                R::MESSAGES.save_failed,
            )),
        }
    }

    /// Confirmation prompt for deleting a loaded row.
    pub fn confirm_delete(&self, id: IdOf<R>) -> Option<Confirmation<IdOf<R>>> {
        find_by_id(self.rows.rows(), id).map(R::confirmation)
    }

    pub async fn delete<S: TokenStorage>(
        &mut self,
        session: &mut Session<S>,
        confirmed: Confirmed<IdOf<R>>,
    ) -> Result<(), SubmitError> {
        session.authorize(&R::permission())?;
        let result = R::delete(session.api(), confirmed).await;
        match session.observe(result) {
            Ok(_) => {
                info!(resource = R::NAME, "deleted");
                self.notices.success(R::MESSAGES.deleted);
                if let Err(err) = self.load(session).await {
                    warn!(resource = R::NAME, error = %err, "list not refreshed after delete");
                }
                Ok(())
            }
            Err(err) => Err(report_failure(
                None,
                &mut self.notices,
                err,
                R::MESSAGES.delete_failed,
            )),
        }
    }
}

pub struct Categories;

impl AdminResource for Categories {
    type Row = Category;
    type Form = CategoryForm;
    type Payload = CategoryPayload;

    const NAME: &'static str = "categories";
    const MESSAGES: Messages = Messages {
        created: "Categoría creada exitosamente",
        updated: "Categoría actualizada exitosamente",
        deleted: "Categoría eliminada exitosamente",
        load_failed: "Error al cargar las categorías",
        save_failed: "Error al guardar la categoría",
        delete_failed: "Error al eliminar la categoría",
    };

    fn permission() -> Permission {
        Permission::CATEGORIES_WRITE
    }

    fn form_for(row: &Category) -> CategoryForm {
        CategoryForm::for_edit(row)
    }

    fn validate(form: &CategoryForm) -> Result<CategoryPayload, FieldErrors> {
        form.validate()
    }

    fn confirmation(row: &Category) -> Confirmation<IdOf<Self>> {
        Confirmation::delete_category(row)
    }

    async fn list(api: &ApiClient) -> Result<Vec<Category>, ApiError> {
        api.list_categories(&CategoryFilter::default()).await
    }

    async fn create(api: &ApiClient, payload: &CategoryPayload) -> Result<Value, ApiError> {
        api.create_category(payload).await
    }

    async fn update(
        api: &ApiClient,
        id: IdOf<Self>,
        payload: &CategoryPayload,
    ) -> Result<Value, ApiError> {
        api.update_category(id, payload).await
    }

    async fn delete(api: &ApiClient, id: Confirmed<IdOf<Self>>) -> Result<Value, ApiError> {
        api.delete_category(id).await
    }
}

pub struct Warehouses;

impl AdminResource for Warehouses {
    type Row = Warehouse;
    type Form = WarehouseForm;
    type Payload = WarehousePayload;

    const NAME: &'static str = "warehouses";
    const MESSAGES: Messages = Messages {
        created: "Almacén creado exitosamente",
        updated: "Almacén actualizado exitosamente",
        deleted: "Almacén eliminado exitosamente",
        load_failed: "Error al cargar los almacenes",
        save_failed: "Error al guardar el almacén",
        delete_failed: "Error al eliminar el almacén",
    };

    fn permission() -> Permission {
        Permission::WAREHOUSES_WRITE
    }

    fn form_for(row: &Warehouse) -> WarehouseForm {
        WarehouseForm::for_edit(row)
    }

    fn validate(form: &WarehouseForm) -> Result<WarehousePayload, FieldErrors> {
        form.validate()
    }

    fn confirmation(row: &Warehouse) -> Confirmation<IdOf<Self>> {
        Confirmation::delete_warehouse(row)
    }

    async fn list(api: &ApiClient) -> Result<Vec<Warehouse>, ApiError> {
        api.list_warehouses().await
    }

    async fn create(api: &ApiClient, payload: &WarehousePayload) -> Result<Value, ApiError> {
        api.create_warehouse(payload).await
    }

    async fn update(
        api: &ApiClient,
        id: IdOf<Self>,
        payload: &WarehousePayload,
    ) -> Result<Value, ApiError> {
        api.update_warehouse(id, payload).await
    }

    async fn delete(api: &ApiClient, id: Confirmed<IdOf<Self>>) -> Result<Value, ApiError> {
        api.delete_warehouse(id).await
    }
}

pub struct Users;

impl AdminResource for Users {
    type Row = User;
    type Form = UserForm;
    type Payload = UserPayload;

    const NAME: &'static str = "users";
    const MESSAGES: Messages = Messages {
        created: "Usuario creado exitosamente",
        updated: "Usuario actualizado exitosamente",
        deleted: "Usuario eliminado exitosamente",
        load_failed: "Error al cargar los usuarios",
        save_failed: "Error al guardar el usuario",
        delete_failed: "Error al eliminar el usuario",
    };

    fn permission() -> Permission {
        Permission::USERS_WRITE
    }

    fn form_for(row: &User) -> UserForm {
        UserForm::for_edit(row)
    }

    fn validate(form: &UserForm) -> Result<UserPayload, FieldErrors> {
        form.validate()
    }

    fn confirmation(row: &User) -> Confirmation<IdOf<Self>> {
        Confirmation::delete_user(row)
    }

    async fn list(api: &ApiClient) -> Result<Vec<User>, ApiError> {
        api.list_users().await
    }

    async fn create(api: &ApiClient, payload: &UserPayload) -> Result<Value, ApiError> {
        api.create_user(payload).await
    }

    async fn update(api: &ApiClient, id: IdOf<Self>, payload: &UserPayload) -> Result<Value, ApiError> {
        api.update_user(id, payload).await
    }

    async fn delete(api: &ApiClient, id: Confirmed<IdOf<Self>>) -> Result<Value, ApiError> {
        api.delete_user(id).await
    }
}

pub type CategoriesPage = AdminPage<Categories>;
pub type WarehousesPage = AdminPage<Warehouses>;
pub type UsersPage = AdminPage<Users>;

#[cfg(test)]
mod tests {
    use super::*;
    use stockdesk_core::{CategoryId, WarehouseId};

    fn categories() -> AdminPage<Categories> {
        let mut page = AdminPage::<Categories>::new();
        let (ticket, ()) = page.rows.request(()).unwrap();
        page.rows.apply(
            ticket,
            Ok(vec![
                Category { id: CategoryId::new(1), name: "Ferretería".into(), warehouse_id: None },
                Category {
                    id: CategoryId::new(2),
                    name: "Frío".into(),
                    warehouse_id: Some(WarehouseId::new(2)),
                },
            ]),
        );
        page
    }

    #[test]
    fn edit_form_is_filled_from_the_loaded_row() {
        let mut page = categories();
        assert!(!page.open_edit(CategoryId::new(7)));
        assert!(page.editor().is_none());

        assert!(page.open_edit(CategoryId::new(2)));
        let editor = page.editor().unwrap();
        assert!(editor.is_edit());
        assert_eq!(editor.form.name, "Frío");
        assert_eq!(editor.form.warehouse_id, Some(WarehouseId::new(2)));

        page.open_create();
        assert!(!page.editor().unwrap().is_edit());
        page.close();
        assert!(page.editor().is_none());
    }

    #[test]
    fn delete_confirmation_names_the_row() {
        let page = categories();
        assert!(page.confirm_delete(CategoryId::new(7)).is_none());
        let confirmation = page.confirm_delete(CategoryId::new(1)).unwrap();
        assert_eq!(confirmation.prompt(), "¿Estás seguro de eliminar la categoría \"Ferretería\"?");
        assert!(confirmation.answer(true).is_some());
    }
}
