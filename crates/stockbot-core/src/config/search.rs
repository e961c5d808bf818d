use super::defaults::*;
use crate::record::Field;
use serde::{Deserialize, Serialize};

/// Which backend serves the inventory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Local workbook (`.xlsx`, `.xls`, `.ods`) or delimited text file.
    #[default]
    File,
    /// Spreadsheet published to the web as delimited text.
    Sheet,
}

/// Data source config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default = "default_source_path")]
    pub path: String,
    /// Published CSV export URL (for `kind = "sheet"`).
    #[serde(default)]
    pub url: String,
    /// Worksheet name inside a workbook. Empty = first sheet.
    #[serde(default)]
    pub worksheet: Option<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Fields whose column must exist, otherwise the load fails with a schema mismatch.
    #[serde(default = "default_required_fields")]
    pub required_fields: Vec<Field>,
    #[serde(default)]
    pub columns: ColumnConfig,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            path: default_source_path(),
            url: String::new(),
            worksheet: None,
            delimiter: default_delimiter(),
            timeout_secs: default_timeout_secs(),
            required_fields: default_required_fields(),
            columns: ColumnConfig::default(),
        }
    }
}

/// Header names accepted for each field, compared case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(default = "default_code_columns")]
    pub code: Vec<String>,
    #[serde(default = "default_name_columns")]
    pub name: Vec<String>,
    #[serde(default = "default_location_columns")]
    pub location: Vec<String>,
    #[serde(default = "default_quantity_columns")]
    pub quantity: Vec<String>,
    #[serde(default = "default_weight_columns")]
    pub weight: Vec<String>,
    #[serde(default = "default_date_in_columns")]
    pub date_in: Vec<String>,
    #[serde(default = "default_storage_age_columns")]
    pub storage_age: Vec<String>,
    #[serde(default = "default_remark_columns")]
    pub remark: Vec<String>,
}

impl ColumnConfig {
    pub fn aliases(&self, field: Field) -> &[String] {
        match field {
            Field::Code => &self.code,
            Field::Name => &self.name,
            Field::Location => &self.location,
            Field::Quantity => &self.quantity,
            Field::Weight => &self.weight,
            Field::DateIn => &self.date_in,
            Field::StorageAge => &self.storage_age,
            Field::Remark => &self.remark,
        }
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            code: default_code_columns(),
            name: default_name_columns(),
            location: default_location_columns(),
            quantity: default_quantity_columns(),
            weight: default_weight_columns(),
            date_in: default_date_in_columns(),
            storage_age: default_storage_age_columns(),
            remark: default_remark_columns(),
        }
    }
}

/// Weakest match that still counts as a hit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Exact,
    Prefix,
    #[default]
    Contains,
}

/// How an alias predicate compares a field to its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasOp {
    Equals,
    Prefix,
    Contains,
}

/// One `(field, op, value)` predicate of an alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasRule {
    pub field: Field,
    pub op: AliasOp,
    pub value: String,
}

/// A query token that expands to a fixed set of predicates (any may match).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasConfig {
    pub token: String,
    pub rules: Vec<AliasRule>,
}

/// Matching and reply formatting config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum rendered results. 0 = unbounded.
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    #[serde(default)]
    pub match_mode: MatchMode,
    #[serde(default = "default_search_fields")]
    pub search_fields: Vec<Field>,
    #[serde(default = "default_name_max_chars")]
    pub name_max_chars: usize,
    #[serde(default = "default_remark_max_chars")]
    pub remark_max_chars: usize,
    /// Platform per-message character limit the reply must fit in.
    #[serde(default = "default_reply_max_chars")]
    pub reply_max_chars: usize,
    #[serde(default = "default_aliases")]
    pub aliases: Vec<AliasConfig>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            display_limit: default_display_limit(),
            suggestion_limit: default_suggestion_limit(),
            match_mode: MatchMode::default(),
            search_fields: default_search_fields(),
            name_max_chars: default_name_max_chars(),
            remark_max_chars: default_remark_max_chars(),
            reply_max_chars: default_reply_max_chars(),
            aliases: default_aliases(),
        }
    }
}
