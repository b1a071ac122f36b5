//! Stock alerts screen: every product with its status and bucket counts.

use stockdesk_auth::TokenStorage;
use stockdesk_inventory::{
    Product, SelectorMode, StockLevels, StockStatus, StockSummary, Warehouse, WarehouseSelection,
    filter_products,
};

use super::{Notices, report_load_failure};
use crate::api::ProductFilter;
use crate::error::ApiError;
use crate::query::{Applied, ListQuery};
use crate::session::Session;

const LOAD_FAILED: &str = "Error al cargar los datos";

pub struct StockAlertsPage {
    warehouses: Vec<Warehouse>,
    products: ListQuery<WarehouseSelection, Product>,
    selection: WarehouseSelection,
    search: String,
    pub notices: Notices,
}

impl Default for StockAlertsPage {
    fn default() -> Self {
        Self {
            warehouses: Vec::new(),
            products: ListQuery::new("stock-alerts"),
            selection: WarehouseSelection::All,
            search: String::new(),
            notices: Notices::default(),
        }
    }
}

impl StockAlertsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn selector_mode(&self) -> SelectorMode {
        SelectorMode::for_warehouses(&self.warehouses)
    }

    pub fn selection(&self) -> WarehouseSelection {
        self.selector_mode().effective_selection(self.selection)
    }

    pub fn is_loading(&self) -> bool {
        self.products.is_loading()
    }

    pub async fn load<S: TokenStorage>(&mut self, session: &mut Session<S>) -> Result<(), ApiError> {
        let result = session.api().list_warehouses().await;
        match session.observe(result) {
            Ok(warehouses) => self.warehouses = warehouses,
            Err(err) => {
                report_load_failure(&mut self.notices, &err, LOAD_FAILED);
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

    async fn fetch<S: TokenStorage>(
        &mut self,
        session: &mut Session<S>,
        force: bool,
    ) -> Result<(), ApiError> {
        let selection = self.selection();
        let issued = match self.products.request(selection) {
            Some(issued) => Some(issued),
            None if force => self.products.reload(),
            None => None,
        };
        let Some((ticket, selection)) = issued else {
            return Ok(());
        };

        let result = session
            .api()
            .list_products(&ProductFilter::in_warehouse(selection))
            .await;
        let result = session.observe(result);
        match self.products.apply(ticket, result) {
            Applied::Failed(err) => {
                report_load_failure(&mut self.notices, &err, LOAD_FAILED);
                Err(err)
            }
            _ => Ok(()),
        }
    }

    /// Local text filter over the loaded rows; does not refetch.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    /// Rows to show, with their status.
    pub fn rows(&self) -> Vec<(&Product, StockStatus)> {
        filter_products(self.products.rows(), &self.search)
            .into_iter()
            .map(|p| (p, p.stock_status()))
            .collect()
    }

    /// Counts over the whole loaded list, independent of the search box.
    pub fn summary(&self) -> StockSummary {
        StockSummary::from_items(self.products.rows())
    }
}
