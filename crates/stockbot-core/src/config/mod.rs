mod channels;
mod defaults;
mod search;


pub use channels::*;
pub use search::*;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::BotError;
use defaults::*;

/// Top-level stockbot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub channel: ChannelConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Reply language ("English" or "Vietnamese").
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for rolling log files. Unset = stderr only.
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            language: default_language(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

/// HTTP server configuration -- LINE webhook, health, and query API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
    /// Bearer token for `/api/query`. Empty = no auth.
    #[serde(default)]
    pub api_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_api_host(),
            port: default_api_port(),
            api_key: String::new(),
        }
    }
}

impl Config {
    /// Apply environment overrides. `lookup` is `std::env::var` in production.
    ///
    /// Secrets are usually injected by the hosting platform rather than
    /// written to `config.toml`, so a set variable always wins.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| lookup(k))
                .find(|v| !v.trim().is_empty())
        };

        if let Some(secret) = first(&["LINE_CHANNEL_SECRET", "CHANNEL_SECRET"]) {
            let line = self.channel.line.get_or_insert_with(|| LineConfig {
                enabled: true,
                ..Default::default()
            });
            line.channel_secret = secret;
        }
        if let Some(token) = first(&["LINE_CHANNEL_ACCESS_TOKEN", "CHANNEL_ACCESS_TOKEN"]) {
            let line = self.channel.line.get_or_insert_with(|| LineConfig {
                enabled: true,
                ..Default::default()
            });
            line.access_token = token;
        }
        if let Some(token) = first(&["TELEGRAM_BOT_TOKEN"]) {
            let telegram = self.channel.telegram.get_or_insert_with(|| TelegramConfig {
                enabled: true,
                ..Default::default()
            });
            telegram.bot_token = token;
        }
        if let Some(port) = first(&["PORT"]) {
            match port.trim().parse::<u16>() {
                Ok(p) => self.api.port = p,
                Err(e) => tracing::warn!("ignoring invalid PORT '{port}': {e}"),
            }
        }
        if let Some(url) = first(&["STOCKBOT_SHEET_URL"]) {
            self.source.kind = SourceKind::Sheet;
            self.source.url = url;
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file, then apply environment overrides.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, BotError> {
    let mut config = load_file(path)?;
    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}

fn load_file(path: &str) -> Result<Config, BotError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| BotError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| BotError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
