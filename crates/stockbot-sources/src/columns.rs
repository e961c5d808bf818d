//! Header row → [`Field`] mapping shared by every backend.

use stockbot_core::config::ColumnConfig;
use stockbot_core::error::BotError;
use stockbot_core::record::{CellValue, Field, Record};
use tracing::debug;

/// Column positions for each mapped field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    slots: Vec<(Field, usize)>,
}

impl ColumnMap {
    /// Map a header row. Headers compare case-insensitively after trimming;
    /// the leftmost matching column wins when several carry the same alias.
    ///
    /// Fails with [`BotError::SchemaMismatch`] naming every `required` field
    /// that no header maps to.
    pub fn from_headers(
        headers: &[String],
        columns: &ColumnConfig,
        required: &[Field],
    ) -> Result<Self, BotError> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let mut slots = Vec::new();
        for field in Field::ALL {
            let aliases: Vec<String> = columns
                .aliases(field)
                .iter()
                .map(|a| normalize_header(a))
                .collect();
            if let Some(idx) = normalized.iter().position(|h| aliases.contains(h)) {
                slots.push((field, idx));
            }
        }

        let missing: Vec<String> = required
            .iter()
            .filter(|f| !slots.iter().any(|(mapped, _)| mapped == *f))
            .map(|f| f.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(BotError::SchemaMismatch { missing });
        }

        debug!("mapped {} of {} columns", slots.len(), headers.len());
        Ok(Self { slots })
    }

    pub fn is_mapped(&self, field: Field) -> bool {
        self.slots.iter().any(|(f, _)| *f == field)
    }

    /// Build a record from one data row. Short rows leave trailing fields unset.
    pub fn record(&self, row: &[CellValue]) -> Record {
        let mut record = Record::new();
        for (field, idx) in &self.slots {
            if let Some(value) = row.get(*idx) {
                record.set(*field, value.clone());
            }
        }
        record
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Turn raw rows into records. The first non-blank row is the header row;
/// fully blank data rows are skipped.
pub fn records_from_rows<I>(
    rows: I,
    columns: &ColumnConfig,
    required: &[Field],
) -> Result<Vec<Record>, BotError>
where
    I: IntoIterator<Item = Vec<CellValue>>,
{
    let mut rows = rows
        .into_iter()
        .skip_while(|row| row.iter().all(CellValue::is_empty));

    let Some(header_row) = rows.next() else {
        if required.is_empty() {
            return Ok(Vec::new());
        }
        return Err(BotError::SchemaMismatch {
            missing: required.iter().map(|f| f.to_string()).collect(),
        });
    };

    let headers: Vec<String> = header_row.iter().map(|c| c.to_string()).collect();
    let map = ColumnMap::from_headers(&headers, columns, required)?;

    Ok(rows
        .map(|row| map.record(&row))
        .filter(|record| !record.is_blank())
        .collect())
}
