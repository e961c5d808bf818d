//! Inventory record model.
//!
//! A [`Record`] is one spreadsheet row mapped onto the fixed set of
//! [`Field`]s the bot knows about. Backends differ in which columns they
//! carry, so every field is optional.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fields a record may carry, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Code,
    Name,
    Location,
    Quantity,
    Weight,
    DateIn,
    StorageAge,
    Remark,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Code,
        Field::Name,
        Field::Location,
        Field::Quantity,
        Field::Weight,
        Field::DateIn,
        Field::StorageAge,
        Field::Remark,
    ];

    /// Config-facing name (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Name => "name",
            Self::Location => "location",
            Self::Quantity => "quantity",
            Self::Weight => "weight",
            Self::DateIn => "date_in",
            Self::StorageAge => "storage_age",
            Self::Remark => "remark",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single scalar cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl CellValue {
    /// Wrap text, collapsing blank strings to [`CellValue::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else if trimmed.len() == value.len() {
            Self::Text(value)
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the cell. Text is accepted when it parses as a number
    /// once thousands separators are removed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Text(s) => parse_number(s).filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

/// Parse spreadsheet number text.
///
/// Accepts `1,234.5` (comma thousands) and `1.234,5` / `12,5` (decimal
/// comma). A separator only counts as grouping when it splits off exactly
/// three digits, so `1,234` is 1234 while `12,5` is 12.5.
fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim();
    if let Ok(n) = s.parse::<f64>() {
        return Some(n);
    }

    // Strip `sep` from `int` if every group after the first is three digits.
    let ungroup = |int: &str, sep: char| -> Option<String> {
        let mut parts = int.split(sep);
        let head = parts.next()?;
        let mut out = head.to_string();
        for group in parts {
            if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            out.push_str(group);
        }
        Some(out)
    };

    let (int, frac) = s.split_once('.').unwrap_or((s, ""));
    if int.contains(',') && !frac.contains([',', '.']) {
        let joined = ungroup(int, ',').map(|i| join_decimal(&i, frac));
        if let Some(n) = joined.and_then(|j| j.parse().ok()) {
            return Some(n);
        }
    }

    let (int, frac) = s.split_once(',')?;
    if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    join_decimal(&ungroup(int, '.')?, frac).parse().ok()
}

fn join_decimal(int: &str, frac: &str) -> String {
    if frac.is_empty() {
        int.to_string()
    } else {
        format!("{int}.{frac}")
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            // Whole numbers read back without a trailing ".0" (codes are often numeric).
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{}", d.format("%d/%m/%Y")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// One inventory row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    cells: BTreeMap<Field, CellValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for tests and in-memory sources.
    pub fn with(mut self, field: Field, value: impl Into<CellValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<CellValue>) {
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&field);
        } else {
            self.cells.insert(field, value);
        }
    }

    /// The value of `field`, or `None` when the column is absent or blank.
    pub fn get(&self, field: Field) -> Option<&CellValue> {
        self.cells.get(&field).filter(|v| !v.is_empty())
    }

    /// Text rendering of `field`, or `None` when absent or blank.
    pub fn text(&self, field: Field) -> Option<String> {
        self.get(field).map(|v| v.to_string())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_empty() {
        assert_eq!(CellValue::text("   "), CellValue::Empty);
        assert_eq!(CellValue::text(" A1 "), CellValue::Text("A1".to_string()));
    }

    #[test]
    fn test_number_from_text_with_separators() {
        assert_eq!(CellValue::text("1,234.5").as_number(), Some(1234.5));
        assert_eq!(CellValue::text("1,234").as_number(), Some(1234.0));
        assert_eq!(CellValue::text("2,500,000").as_number(), Some(2_500_000.0));
        assert_eq!(CellValue::text("n/a").as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), None);
    }

    #[test]
    fn test_number_with_decimal_comma() {
        assert_eq!(CellValue::text("12,5").as_number(), Some(12.5));
        assert_eq!(CellValue::text(" 0,25 ").as_number(), Some(0.25));
        assert_eq!(CellValue::text("1.234,5").as_number(), Some(1234.5));
        assert_eq!(CellValue::text("12,50,5").as_number(), None);
        assert_eq!(CellValue::text("1.23,5").as_number(), None);
        assert_eq!(CellValue::text("12,").as_number(), None);
    }

    #[test]
    fn test_whole_number_displays_without_fraction() {
        assert_eq!(CellValue::Number(13541900000030.0).to_string(), "13541900000030");
        assert_eq!(CellValue::Number(12.5).to_string(), "12.5");
    }

    #[test]
    fn test_record_get_skips_blank_fields() {
        let record = Record::new()
            .with(Field::Code, "FS01")
            .with(Field::Remark, "");
        assert_eq!(record.text(Field::Code).as_deref(), Some("FS01"));
        assert!(record.get(Field::Remark).is_none());
        assert!(record.get(Field::Name).is_none());
        assert!(!record.is_blank());
        assert!(Record::new().is_blank());
    }

    #[test]
    fn test_field_serde_names() {
        let f: Field = serde_json::from_str("\"date_in\"").unwrap();
        assert_eq!(f, Field::DateIn);
        assert_eq!(Field::StorageAge.as_str(), "storage_age");
    }
}
