//! Dashboard: headline counts, monthly rankings and report generation.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use stockdesk_auth::TokenStorage;
use stockdesk_inventory::{Product, StockLevels, StockStatus};

use super::{Notices, report_load_failure};
use crate::api::DashboardStats;
use crate::error::ApiError;
use crate::reports::{ReportError, ReportFile, ReportRequest};
use crate::session::Session;
use crate::submit::SubmitGuard;

#[derive(Default)]
pub struct DashboardPage {
    stats: Option<DashboardStats>,
    loading: bool,
    report_guard: SubmitGuard,
    pub notices: Notices,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_generating_report(&self) -> bool {
        self.report_guard.is_busy()
    }

    /// Failures keep the previously shown numbers.
    pub async fn load<S: TokenStorage>(&mut self, session: &mut Session<S>) -> Result<(), ApiError> {
        self.loading = true;
        let result = session.api().dashboard_stats().await;
        let result = session.observe(result);
        self.loading = false;
        match result {
            Ok(stats) => {
                self.stats = Some(stats);
                Ok(())
            }
            Err(err) => {
                report_load_failure(&mut self.notices, &err, "Error al obtener estadísticas");
                Err(err)
            }
        }
    }

    /// Low-stock alert rows with their classified status.
    pub fn alerts(&self) -> Vec<(&Product, StockStatus)> {
        self.stats
            .iter()
            .flat_map(|s| s.low_stock_alerts.iter())
            .map(|p| (p, p.stock_status()))
            .collect()
    }

    /// Download a report and write it into `dir`.
    pub async fn generate_report<S: TokenStorage>(
        &mut self,
        session: &mut Session<S>,
        request: &ReportRequest,
        dir: &Path,
        today: NaiveDate,
    ) -> Result<PathBuf, ReportError> {
        let _permit = self.report_guard.try_acquire().ok_or(ReportError::Busy)?;
        let result = session.api().download_report(request).await;
        let outcome = session
            .observe(result)
            .map_err(ReportError::from)
            .and_then(|body| ReportFile::from_body(request, body, today))
            .and_then(|file| file.write_to(dir));

        match &outcome {
            Ok(path) => {
                info!(path = %path.display(), "report generated");
                self.notices.success("Reporte generado exitosamente");
            }
            Err(ReportError::NoData) => self.notices.error("No hay datos para exportar"),
            Err(ReportError::Api(ApiError::Rejected { message, .. })) => self.notices.error(message),
            Err(_) => self.notices.error("Error al generar el reporte"),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_to_show_before_the_first_load() {
        let page = DashboardPage::new();
        assert!(page.stats().is_none());
        assert!(page.alerts().is_empty());
        assert!(!page.is_loading());
        assert!(!page.is_generating_report());
    }

    #[test]
    fn alerts_are_classified() {
        let low_stock_alerts = serde_json::from_value(serde_json::json!([
            { "id": 1, "sku": "TOR-1", "nombre": "Tornillo", "warehouse_id": 1,
              "stock": 0, "stock_minimo": 5, "stock_maximo": 50 },
            { "id": 2, "sku": "TUE-1", "nombre": "Tuerca", "warehouse_id": 1,
              "stock": 6, "stock_minimo": 5, "stock_maximo": 50 }
        ]))
        .unwrap();
        let page = DashboardPage {
            stats: Some(DashboardStats {
                total_products: 2,
                low_stock_products: 1,
                total_users: 1,
                top_entries_month: Vec::new(),
                low_exits_month: Vec::new(),
                low_stock_alerts,
            }),
            ..DashboardPage::default()
        };
        let alerts: Vec<(&str, StockStatus)> =
            page.alerts().into_iter().map(|(p, s)| (p.sku.as_str(), s)).collect();
        assert_eq!(alerts, vec![("TOR-1", StockStatus::Bajo), ("TUE-1", StockStatus::Medio)]);
    }
}
