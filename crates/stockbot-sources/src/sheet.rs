//! Published spreadsheet backend.
//!
//! Google Sheets (and most hosted spreadsheets) can publish a worksheet as
//! CSV at a stable URL. The sheet is fetched on every load.

use crate::columns::records_from_rows;
use async_trait::async_trait;
use std::io::Read;
use std::time::Duration;
use stockbot_core::config::SourceConfig;
use stockbot_core::error::BotError;
use stockbot_core::record::{CellValue, Record};
use stockbot_core::traits::DataSource;
use tracing::debug;

/// Fetches the inventory as delimited text over HTTP.
pub struct SheetSource {
    config: SourceConfig,
    client: reqwest::Client,
}

impl SheetSource {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn fetch(&self) -> Result<String, BotError> {
        if self.config.url.trim().is_empty() {
            return Err(BotError::DataSourceUnavailable(
                "no sheet url configured".to_string(),
            ));
        }
        let unavailable = |e: reqwest::Error| {
            BotError::DataSourceUnavailable(format!("sheet fetch failed: {e}"))
        };
        let resp = self
            .client
            .get(&self.config.url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?;
        resp.text().await.map_err(unavailable)
    }
}

#[async_trait]
impl DataSource for SheetSource {
    fn describe(&self) -> String {
        self.config.url.clone()
    }

    async fn load(&self) -> Result<Vec<Record>, BotError> {
        let body = self.fetch().await?;
        debug!("fetched {} bytes from sheet", body.len());
        let rows = read_delimited(body.as_bytes(), self.config.delimiter)?;
        records_from_rows(rows, &self.config.columns, &self.config.required_fields)
    }
}

/// Read every row of delimited text as cells. Rows may differ in length.
pub fn read_delimited<R: Read>(
    reader: R,
    delimiter: char,
) -> Result<Vec<Vec<CellValue>>, BotError> {
    if !delimiter.is_ascii() {
        return Err(BotError::Config(format!(
            "delimiter must be a single ASCII character, got '{delimiter}'"
        )));
    }
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for row in rdr.records() {
        let row =
            row.map_err(|e| BotError::DataSourceUnavailable(format!("malformed sheet: {e}")))?;
        rows.push(row.iter().map(CellValue::text).collect());
    }
    Ok(rows)
}
