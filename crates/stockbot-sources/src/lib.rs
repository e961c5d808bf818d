//! # stockbot-sources
//!
//! [`DataSource`](stockbot_core::traits::DataSource) backends: a local
//! workbook or delimited file, and a spreadsheet published to the web.
//! Both reload the whole sheet on every call.

pub mod columns;
pub mod file;
pub mod sheet;

pub use file::FileSource;
pub use sheet::SheetSource;

use std::sync::Arc;
use stockbot_core::config::{SourceConfig, SourceKind};
use stockbot_core::traits::DataSource;

/// Build the configured backend.
pub fn from_config(config: &SourceConfig) -> Arc<dyn DataSource> {
    match config.kind {
        SourceKind::File => Arc::new(FileSource::new(config.clone())),
        SourceKind::Sheet => Arc::new(SheetSource::new(config.clone())),
    }
}
