use thiserror::Error;

/// Top-level error type for stockbot.
#[derive(Debug, Error)]
pub enum BotError {
    /// The inventory source is missing, unreachable, or unreadable.
    #[error("data source unavailable: {0}")]
    DataSourceUnavailable(String),

    /// Columns required for lookups are absent from the loaded sheet.
    #[error("schema mismatch: missing columns {}", .missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
