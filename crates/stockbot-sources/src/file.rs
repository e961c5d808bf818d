//! Local file backend.
//!
//! `.xlsx`, `.xlsm`, `.xls`, `.xlsb` and `.ods` go through calamine;
//! anything else is read as delimited text.

use crate::columns::records_from_rows;
use async_trait::async_trait;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::{Path, PathBuf};
use stockbot_core::config::{shellexpand, SourceConfig};
use stockbot_core::error::BotError;
use stockbot_core::record::{CellValue, Record};
use stockbot_core::traits::DataSource;
use tracing::debug;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Reads the inventory from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    config: SourceConfig,
    path: PathBuf,
}

impl FileSource {
    pub fn new(config: SourceConfig) -> Self {
        let path = PathBuf::from(shellexpand(&config.path));
        Self { config, path }
    }

    fn is_workbook(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| WORKBOOK_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }

    fn load_blocking(&self) -> Result<Vec<Record>, BotError> {
        if !self.path.exists() {
            return Err(BotError::DataSourceUnavailable(format!(
                "{} not found",
                self.path.display()
            )));
        }
        let rows = if self.is_workbook() {
            read_workbook(&self.path, self.config.worksheet.as_deref())?
        } else {
            let file = std::fs::File::open(&self.path).map_err(|e| {
                BotError::DataSourceUnavailable(format!("{}: {e}", self.path.display()))
            })?;
            crate::sheet::read_delimited(file, self.config.delimiter)?
        };
        debug!("read {} rows from {}", rows.len(), self.path.display());
        records_from_rows(rows, &self.config.columns, &self.config.required_fields)
    }
}

#[async_trait]
impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<Record>, BotError> {
        // calamine and csv are blocking readers.
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.load_blocking())
            .await
            .map_err(|e| BotError::DataSourceUnavailable(format!("load task failed: {e}")))?
    }
}

/// Every row of the chosen worksheet (the first one when unset).
fn read_workbook(path: &Path, worksheet: Option<&str>) -> Result<Vec<Vec<CellValue>>, BotError> {
    let unavailable = |e: calamine::Error| {
        BotError::DataSourceUnavailable(format!("{}: {e}", path.display()))
    };
    let mut workbook = open_workbook_auto(path).map_err(unavailable)?;

    let name = match worksheet.filter(|w| !w.trim().is_empty()) {
        Some(w) => w.to_string(),
        None => workbook.sheet_names().first().cloned().ok_or_else(|| {
            BotError::DataSourceUnavailable(format!("{} has no worksheets", path.display()))
        })?,
    };
    let range = workbook.worksheet_range(&name).map_err(unavailable)?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect())
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) => CellValue::Date(dt.date()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match chrono::NaiveDate::parse_from_str(
            s.get(..10).unwrap_or(s.as_str()),
            "%Y-%m-%d",
        ) {
            Ok(d) => CellValue::Date(d),
            Err(_) => CellValue::text(s.as_str()),
        },
        Data::DurationIso(s) => CellValue::text(s.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use stockbot_core::record::Field;

    fn source_for(path: &Path) -> FileSource {
        FileSource::new(SourceConfig {
            path: path.display().to_string(),
            ..SourceConfig::default()
        })
    }

    #[tokio::test]
    async fn test_load_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "CODE,PRODUCT,LOCK,Quantity,Weight,Date In,Remark").unwrap();
        writeln!(f, "FS01,Flour Standard,A1,12.5,25,01/03/2025,").unwrap();
        writeln!(f, ",,,,,,").unwrap();
        writeln!(f, "LS02,Lime Stone,B2,\"1,200\",50,,dry").unwrap();
        drop(f);

        let records = source_for(&path).load().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text(Field::Code).as_deref(), Some("FS01"));
        assert_eq!(records[0].get(Field::Quantity).and_then(CellValue::as_number), Some(12.5));
        assert_eq!(records[1].get(Field::Quantity).and_then(CellValue::as_number), Some(1200.0));
        assert_eq!(records[1].text(Field::Remark).as_deref(), Some("dry"));
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = source_for(&dir.path().join("nope.xlsx")).load().await.unwrap_err();
        assert!(matches!(err, BotError::DataSourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_missing_code_column_is_schema_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.csv");
        std::fs::write(&path, "PRODUCT,Quantity\nFlour,1\n").unwrap();

        let err = source_for(&path).load().await.unwrap_err();
        assert!(matches!(err, BotError::SchemaMismatch { .. }));
    }

    #[tokio::test]
    async fn test_corrupt_workbook_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        let err = source_for(&path).load().await.unwrap_err();
        assert!(matches!(err, BotError::DataSourceUnavailable(_)));
    }

    #[test]
    fn test_workbook_cells() {
        assert_eq!(cell_value(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(cell_value(&Data::String(" A1 ".into())), CellValue::text("A1"));
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(
            cell_value(&Data::DateTimeIso("2025-03-01T00:00:00".into())),
            CellValue::Date(chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
        );
    }
}
