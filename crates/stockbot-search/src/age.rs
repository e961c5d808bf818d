//! Storage age: how long a lot has been in the warehouse.
//!
//! Sheets record intake dates in whatever format the operator typed, so
//! parsing is permissive. When nothing parses the result is an explicit
//! [`StorageAge::Unknown`] rather than a silent default.

use chrono::{NaiveDate, NaiveDateTime};
use stockbot_core::record::{CellValue, Field, Record};

/// Day-first formats come first: the sheets are maintained in Vietnam.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d", "%d.%m.%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageAge {
    Days(i64),
    /// An intake date is present but could not be parsed.
    Unknown,
    /// Neither a stated age nor an intake date.
    NoDate,
}

/// Parse a date cell, trying every known layout.
pub fn parse_date(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Date(d) => Some(*d),
        CellValue::Text(s) => parse_date_str(s),
        _ => None,
    }
}

pub fn parse_date_str(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Storage age of `record` as of `today`.
///
/// A numeric `storage_age` column wins; otherwise the age is computed from
/// `date_in`. Future intake dates clamp to zero days.
pub fn storage_age(record: &Record, today: NaiveDate) -> StorageAge {
    if let Some(days) = record.get(Field::StorageAge).and_then(CellValue::as_number) {
        return StorageAge::Days(days.round() as i64);
    }
    match record.get(Field::DateIn) {
        None => StorageAge::NoDate,
        Some(value) => match parse_date(value) {
            Some(date_in) => StorageAge::Days((today - date_in).num_days().max(0)),
            None => StorageAge::Unknown,
        },
    }
}
