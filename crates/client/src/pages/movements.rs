//! Movement log and the "register movement" form.

use tracing::{info, warn};

use stockdesk_auth::{Permission, TokenStorage};
use stockdesk_core::{DomainResult, FieldErrors, IntegerInput, find_by_id, parse_integer};
use stockdesk_inventory::{
    Movement, MovementForm, MovementPayload, MovementType, PickerState, Product, ProductPicker,
    SelectorMode, Warehouse, WarehouseSelection, validate_movement,
};

use super::{Notices, report_failure, report_load_failure};
use crate::api::{MovementFilter, ProductFilter};
use crate::error::{ApiError, SubmitError};
use crate::query::{Applied, ListQuery};
use crate::session::Session;
use crate::submit::SubmitGuard;

const LOAD_FAILED: &str = "Error al cargar los datos";
const SAVE_FAILED: &str = "Error al registrar el movimiento";
const SAVED: &str = "Movimiento registrado exitosamente";

/// State of the movement form: type, product picker, quantity and note.
#[derive(Debug, Clone, Default)]
pub struct MovementRecorder {
    form: MovementForm,
    picker: ProductPicker,
    choice: WarehouseSelection,
    errors: FieldErrors,
}

impl MovementRecorder {
    pub fn new(warehouses: &[Warehouse]) -> Self {
        let mut recorder = Self::default();
        recorder.choose_warehouse(warehouses, WarehouseSelection::All);
        recorder
    }

    pub fn form(&self) -> &MovementForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn picker(&self) -> &ProductPicker {
        &self.picker
    }

    /// Warehouse the picker is filtered by.
    pub fn warehouse(&self) -> WarehouseSelection {
        self.picker.warehouse()
    }

    /// The selector is only shown when there is more than one warehouse.
    pub fn selector_mode(warehouses: &[Warehouse]) -> SelectorMode {
        SelectorMode::for_warehouses(warehouses)
    }

    pub fn choose_warehouse(&mut self, warehouses: &[Warehouse], choice: WarehouseSelection) {
        self.choice = choice;
        let effective = Self::selector_mode(warehouses).effective_selection(choice);
        self.picker.set_warehouse(effective);
        self.sync_product();
    }

    /// Re-apply the user's warehouse choice after the warehouse list changed.
    /// A choice that no longer applies falls back to the automatic selection.
    pub fn rescope(&mut self, warehouses: &[Warehouse]) {
        self.choose_warehouse(warehouses, self.choice);
    }

    pub fn set_kind(&mut self, kind: MovementType) {
        self.form.kind = kind;
        self.errors.clear_field("cantidad");
    }

    pub fn set_quantity(&mut self, quantity: &str) {
        self.form.quantity = quantity.to_string();
        self.errors.clear_field("cantidad");
    }

    pub fn set_note(&mut self, note: &str) {
        self.form.note = note.to_string();
    }

    pub fn type_product(&mut self, text: &str) {
        self.picker.type_text(text);
        self.sync_product();
    }

    pub fn suggestions<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        self.picker.suggestions(products)
    }

    pub fn select_product(&mut self, product: &Product) -> DomainResult<()> {
        self.picker.select(product)?;
        self.sync_product();
        self.errors.clear_field("product_id");
        Ok(())
    }

    pub fn clear_product(&mut self) {
        self.picker.clear();
        self.sync_product();
    }

    fn sync_product(&mut self) {
        self.form.product_id = match self.picker.state() {
            PickerState::Selected { product_id, .. } => Some(*product_id),
            _ => None,
        };
    }

    pub fn selected_product<'a>(&self, products: &'a [Product]) -> Option<&'a Product> {
        self.form.product_id.and_then(|id| find_by_id(products, id))
    }

    /// Stock the selected product would end up with, for the form preview.
    pub fn projected_stock(&self, products: &[Product]) -> Option<i64> {
        let product = self.selected_product(products)?;
        match parse_integer(&self.form.quantity) {
            IntegerInput::Value(q) if q > 0 => Some(self.form.kind.apply(product.stock, q)),
            _ => None,
        }
    }

    /// Validate against the loaded products, keeping the errors for display.
    pub fn validate(&mut self, products: &[Product]) -> Result<MovementPayload, FieldErrors> {
        let selected = self.selected_product(products);
        let result = validate_movement(&self.form, selected);
        self.errors = result.as_ref().err().cloned().unwrap_or_default();
        result
    }
}

pub struct MovementsPage {
    warehouses: Vec<Warehouse>,
    products: Vec<Product>,
    movements: ListQuery<MovementFilter, Movement>,
    selection: WarehouseSelection,
    recorder: Option<MovementRecorder>,
    guard: SubmitGuard,
    pub notices: Notices,
}

impl Default for MovementsPage {
    fn default() -> Self {
        Self {
            warehouses: Vec::new(),
            products: Vec::new(),
            movements: ListQuery::new("movements"),
            selection: WarehouseSelection::All,
            recorder: None,
            guard: SubmitGuard::new(),
            notices: Notices::default(),
        }
    }
}

impl MovementsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movements(&self) -> &[Movement] {
        self.movements.rows()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn is_loading(&self) -> bool {
        self.movements.is_loading()
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn selector_mode(&self) -> SelectorMode {
        SelectorMode::for_warehouses(&self.warehouses)
    }

    pub fn selection(&self) -> WarehouseSelection {
        self.selector_mode().effective_selection(self.selection)
    }

    pub async fn load<S: TokenStorage>(&mut self, session: &mut Session<S>) -> Result<(), ApiError> {
        self.load_lookups(session).await?;
        self.fetch(session, true).await
    }

    async fn load_lookups<S: TokenStorage>(&mut self, session: &mut Session<S>) -> Result<(), ApiError> {
        let api = session.api();
        let all_products = ProductFilter::default();
        let (warehouses, products) =
            tokio::join!(api.list_warehouses(), api.list_products(&all_products));
        let warehouses = session.observe(warehouses);
        let products = session.observe(products);
        match (warehouses, products) {
            (Ok(warehouses), Ok(products)) => {
                self.warehouses = warehouses;
                self.products = products;
                if let Some(recorder) = self.recorder.as_mut() {
                    recorder.rescope(&self.warehouses);
                }
                Ok(())
            }
            (Err(err), _) | (_, Err(err)) => {
                report_load_failure(&mut self.notices, &err, LOAD_FAILED);
                Err(err)
            }
        }
    }

    pub async fn select_warehouse<S: TokenStorage>(
        &mut self,
        session: &mut Session<S>,
        selection: WarehouseSelection,
    ) -> Result<(), ApiError> {
        self.selection = selection;
        self.fetch(session, false).await
    }

    async fn fetch<S: TokenStorage>(
        &mut self,
        session: &mut Session<S>,
        force: bool,
    ) -> Result<(), ApiError> {
        let filter = MovementFilter { warehouse: self.selection(), product: None };
        let issued = match self.movements.request(filter) {
            Some(issued) => Some(issued),
            None if force => self.movements.reload(),
            None => None,
        };
        let Some((ticket, filter)) = issued else {
            return Ok(());
        };

        let result = session.api().list_movements(&filter).await;
        let result = session.observe(result);
        match self.movements.apply(ticket, result) {
            Applied::Failed(err) => {
                report_load_failure(&mut self.notices, &err, LOAD_FAILED);
                Err(err)
            }
            _ => Ok(()),
        }
    }

    pub fn recorder(&self) -> Option<&MovementRecorder> {
        self.recorder.as_ref()
    }

    pub fn recorder_mut(&mut self) -> Option<&mut MovementRecorder> {
        self.recorder.as_mut()
    }

    pub fn open_recorder(&mut self) -> &mut MovementRecorder {
        self.recorder.insert(MovementRecorder::new(&self.warehouses))
    }

    pub fn choose_recorder_warehouse(&mut self, choice: WarehouseSelection) {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.choose_warehouse(&self.warehouses, choice);
        }
    }

    pub fn close_recorder(&mut self) {
        self.recorder = None;
    }

    /// Validate and post the open movement form.
    ///
    /// On success the form closes and both the log and the product list
    /// (whose stock changed) are reloaded.
    pub async fn submit<S: TokenStorage>(
        &mut self,
        session: &mut Session<S>,
    ) -> Result<MovementPayload, SubmitError> {
        session.authorize(&Permission::MOVEMENTS_CREATE)?;
        let permit = self.guard.try_acquire().ok_or(SubmitError::Busy)?;
        let recorder = self.recorder.as_mut().ok_or(SubmitError::NoForm)?;
        let payload = recorder.validate(&self.products).map_err(SubmitError::Invalid)?;

        let result = session.api().create_movement(&payload).await;
        match session.observe(result) {
            Ok(_) => {
                info!(
                    product_id = %payload.product_id,
                    kind = %payload.kind,
                    quantity = payload.quantity,
                    "movement registered"
                );
                self.notices.success(SAVED);
                self.recorder = None;
                drop(permit);
                let lookups = self.load_lookups(session).await;
                let log = self.fetch(session, true).await;
                if let Err(err) = lookups.and(log) {
                    warn!(error = %err, "movement screen not fully refreshed after save");
                }
                Ok(payload)
            }
            Err(err) => Err(report_failure(
                self.recorder.as_mut().map(|r| &mut r.errors),
                &mut self.notices,
                err,
                SAVE_FAILED,
            )),
        }
    }
}
