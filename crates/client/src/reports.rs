//! Report download: request shape, file naming and CSV rendering.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use stockdesk_inventory::WarehouseSelection;

use crate::api::ReportBody;
use crate::error::ApiError;

const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("no hay datos para exportar")]
    NoData,

    #[error("a report is already being generated")]
    Busy,

    #[error("unexpected report body: {0}")]
    UnexpectedBody(String),

    #[error("could not write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed writing {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Csv,
    Pdf,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
        }
    }
}

impl core::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "pdf" => Ok(ReportFormat::Pdf),
            other => Err(format!("unknown report format '{other}' (expected csv or pdf)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Stock levels for a month.
    Inventory { year: i32, month: u32 },
    /// Products at or below their minimum, as of today.
    LowStock,
    Movements { year: i32, month: u32 },
}

impl ReportKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ReportKind::Inventory { .. } => "/dashboard/inventory-report-month",
            ReportKind::LowStock => "/dashboard/low-stock-report",
            ReportKind::Movements { .. } => "/dashboard/movements-report-month",
        }
    }

    fn period(&self) -> Option<(i32, u32)> {
        match *self {
            ReportKind::Inventory { year, month } | ReportKind::Movements { year, month } => {
                Some((year, month))
            }
            ReportKind::LowStock => None,
        }
    }

    fn file_stem(&self, today: NaiveDate) -> String {
        match self {
            ReportKind::Inventory { year, month } => format!("inventario_{year}_{month}"),
            ReportKind::LowStock => format!("stock_bajo_{}", today.format("%Y-%m-%d")),
            ReportKind::Movements { year, month } => format!("movimientos_{year}_{month}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub kind: ReportKind,
    pub format: ReportFormat,
    pub warehouse: WarehouseSelection,
}

impl ReportRequest {
    pub fn new(kind: ReportKind, format: ReportFormat) -> Result<Self, ReportError> {
        if let Some((_, month)) = kind.period() {
            if !(1..=12).contains(&month) {
                return Err(ReportError::InvalidMonth(month));
            }
        }
        Ok(Self { kind, format, warehouse: WarehouseSelection::All })
    }

    pub fn in_warehouse(mut self, warehouse: WarehouseSelection) -> Self {
        self.warehouse = warehouse;
        self
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some((year, month)) = self.kind.period() {
            query.push(("year", year.to_string()));
            query.push(("month", month.to_string()));
        }
        query.push(("format", self.format.as_str().to_string()));
        if let Some(id) = self.warehouse.warehouse_id() {
            query.push(("warehouse_id", id.to_string()));
        }
        query
    }

    pub fn file_name(&self, today: NaiveDate) -> String {
        format!("{}.{}", self.kind.file_stem(today), self.format.as_str())
    }
}

/// A report ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ReportFile {
    pub fn from_body(
        request: &ReportRequest,
        body: ReportBody,
        today: NaiveDate,
    ) -> Result<Self, ReportError> {
        let bytes = match (request.format, body) {
            (ReportFormat::Csv, ReportBody::Json(Value::Array(rows))) => {
                render_csv(&rows)?.into_bytes()
            }
            (ReportFormat::Csv, ReportBody::Json(other)) => {
                return Err(ReportError::UnexpectedBody(format!(
                    "expected a list of rows, got {}",
                    json_kind(&other)
                )));
            }
            (ReportFormat::Pdf, ReportBody::Json(_)) => {
                return Err(ReportError::UnexpectedBody("expected a PDF, got JSON".into()));
            }
            (_, ReportBody::Bytes(bytes)) if bytes.is_empty() => return Err(ReportError::NoData),
            (_, ReportBody::Bytes(bytes)) => bytes,
        };
        Ok(Self { file_name: request.file_name(today), bytes })
    }

    /// Write into `dir`, returning the full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .map_err(|source| ReportError::Io { path: path.clone(), source })?;
        info!(path = %path.display(), bytes = self.bytes.len(), "report saved");
        Ok(path)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Render JSON rows as CSV.
///
/// Columns come from the first row's keys, in order. The output starts with
/// a UTF-8 BOM so spreadsheet tools pick the right encoding.
pub fn render_csv(rows: &[Value]) -> Result<String, ReportError> {
    let Some(first) = rows.first() else {
        return Err(ReportError::NoData);
    };
    let Value::Object(first) = first else {
        return Err(ReportError::UnexpectedBody(format!("rows must be objects, got {}", json_kind(first))));
    };
    let headers: Vec<&String> = first.keys().collect();

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.as_bytes().to_vec());
    writer.write_record(&headers)?;
    for row in rows {
        writer.write_record(headers.iter().map(|h| cell_text(row.get(h.as_str()))))?;
    }
    let mut bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    // Rows are joined by newlines; the last one is not terminated.
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    String::from_utf8(bytes).map_err(|e| ReportError::UnexpectedBody(e.to_string()))
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stockdesk_core::WarehouseId;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn file_names_follow_report_kind() {
        let inventory = ReportRequest::new(ReportKind::Inventory { year: 2024, month: 3 }, ReportFormat::Csv).unwrap();
        assert_eq!(inventory.file_name(day()), "inventario_2024_3.csv");

        let low = ReportRequest::new(ReportKind::LowStock, ReportFormat::Pdf).unwrap();
        assert_eq!(low.file_name(day()), "stock_bajo_2024-03-09.pdf");

        let moves = ReportRequest::new(ReportKind::Movements { year: 2023, month: 12 }, ReportFormat::Pdf).unwrap();
        assert_eq!(moves.file_name(day()), "movimientos_2023_12.pdf");
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        for month in [0, 13] {
            let err = ReportRequest::new(ReportKind::Movements { year: 2024, month }, ReportFormat::Csv).unwrap_err();
            assert!(matches!(err, ReportError::InvalidMonth(m) if m == month));
        }
    }

    #[test]
    fn query_carries_period_format_and_warehouse() {
        let request = ReportRequest::new(ReportKind::Inventory { year: 2024, month: 5 }, ReportFormat::Pdf)
            .unwrap()
            .in_warehouse(WarehouseSelection::Only(WarehouseId::new(3)));
        assert_eq!(
            request.query(),
            vec![
                ("year", "2024".to_string()),
                ("month", "5".to_string()),
                ("format", "pdf".to_string()),
                ("warehouse_id", "3".to_string()),
            ]
        );

        let low = ReportRequest::new(ReportKind::LowStock, ReportFormat::Csv).unwrap();
        assert_eq!(low.query(), vec![("format", "csv".to_string())]);
    }

    #[test]
    fn csv_has_bom_header_and_escaped_cells() {
        let rows = vec![
            json!({ "sku": "A-1", "nombre": "Tornillo, 3mm", "stock": 5, "nota": null }),
            json!({ "sku": "B-2", "nombre": "Llave \"inglesa\"", "stock": 0, "nota": "ok" }),
        ];
        let csv = render_csv(&rows).unwrap();
        assert_eq!(
            csv,
            "\u{feff}sku,nombre,stock,nota\nA-1,\"Tornillo, 3mm\",5,\nB-2,\"Llave \"\"inglesa\"\"\",0,ok"
        );
    }

    #[test]
    fn carriage_returns_are_quoted() {
        let rows = vec![json!({ "sku": "A-1", "nota": "linea 1\r\nlinea 2" }), json!({ "sku": "B\r2", "nota": "" })];
        let csv = render_csv(&rows).unwrap();
        assert_eq!(csv, "\u{feff}sku,nota\nA-1,\"linea 1\r\nlinea 2\"\n\"B\r2\",");
    }

    #[test]
    fn empty_rows_are_no_data() {
        assert!(matches!(render_csv(&[]), Err(ReportError::NoData)));
        let request = ReportRequest::new(ReportKind::LowStock, ReportFormat::Csv).unwrap();
        let err = ReportFile::from_body(&request, ReportBody::Json(json!([])), day()).unwrap_err();
        assert!(matches!(err, ReportError::NoData));
    }

    #[test]
    fn pdf_bytes_are_kept_verbatim() {
        let request = ReportRequest::new(ReportKind::LowStock, ReportFormat::Pdf).unwrap();
        let file = ReportFile::from_body(&request, ReportBody::Bytes(b"%PDF-1.4".to_vec()), day()).unwrap();
        assert_eq!(file.bytes, b"%PDF-1.4");
        assert_eq!(file.file_name, "stock_bajo_2024-03-09.pdf");
    }

    #[test]
    fn writes_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = ReportFile { file_name: "r.csv".into(), bytes: b"a,b".to_vec() };
        let path = file.write_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("r.csv"));
        assert_eq!(std::fs::read(&path).unwrap(), b"a,b");
    }
}
