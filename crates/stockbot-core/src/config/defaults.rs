//! Default value functions used by serde for config deserialization.

use super::{AliasConfig, AliasOp, AliasRule};
use crate::record::Field;

pub fn default_name() -> String {
    "Stockbot".to_string()
}

pub fn default_language() -> String {
    "English".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_source_path() -> String {
    "Kho_nguyen_lieu.xlsx".to_string()
}

pub fn default_delimiter() -> char {
    ','
}

pub fn default_timeout_secs() -> u64 {
    15
}

pub fn default_required_fields() -> Vec<Field> {
    vec![Field::Code]
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn default_code_columns() -> Vec<String> {
    columns(&["CODE", "Item Code", "Product Code"])
}

pub fn default_name_columns() -> Vec<String> {
    columns(&["PRODUCT", "Product Name", "Name"])
}

pub fn default_location_columns() -> Vec<String> {
    columns(&["LOCK", "Location"])
}

pub fn default_quantity_columns() -> Vec<String> {
    columns(&["Quantity"])
}

pub fn default_weight_columns() -> Vec<String> {
    columns(&["Weight"])
}

pub fn default_date_in_columns() -> Vec<String> {
    columns(&["Date In", "Input date"])
}

pub fn default_storage_age_columns() -> Vec<String> {
    columns(&["Storage Age"])
}

pub fn default_remark_columns() -> Vec<String> {
    columns(&["Remark"])
}

pub fn default_display_limit() -> usize {
    8
}

pub fn default_suggestion_limit() -> usize {
    3
}

pub fn default_search_fields() -> Vec<Field> {
    vec![Field::Code, Field::Name, Field::Location]
}

pub fn default_name_max_chars() -> usize {
    40
}

pub fn default_remark_max_chars() -> usize {
    60
}

/// Stays under both LINE (5000) and Telegram (4096) per-message limits.
pub fn default_reply_max_chars() -> usize {
    4000
}

pub fn default_aliases() -> Vec<AliasConfig> {
    vec![AliasConfig {
        token: "RBF".to_string(),
        rules: vec![
            AliasRule {
                field: Field::Name,
                op: AliasOp::Contains,
                value: "CÁM GẠO".to_string(),
            },
            AliasRule {
                field: Field::Code,
                op: AliasOp::Prefix,
                value: "RBF".to_string(),
            },
        ],
    }]
}

pub fn default_line_api_base() -> String {
    "https://api.line.me".to_string()
}

pub fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

pub fn default_api_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_api_port() -> u16 {
    5000
}
