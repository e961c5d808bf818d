use super::defaults::*;
use serde::{Deserialize, Serialize};

/// Channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelConfig {
    pub line: Option<LineConfig>,
    pub telegram: Option<TelegramConfig>,
}

/// LINE Messaging API config.
///
/// Inbound events arrive on the HTTP server's `/webhook` route; replies go
/// through the reply endpoint using the event's reply token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Used to verify `X-Line-Signature`.
    #[serde(default)]
    pub channel_secret: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_line_api_base")]
    pub api_base: String,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            channel_secret: String::new(),
            access_token: String::new(),
            api_base: default_line_api_base(),
        }
    }
}

/// Telegram bot config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub bot_token: String,
    /// Empty = allow all.
    #[serde(default)]
    pub allowed_users: Vec<i64>,
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bot_token: String::new(),
            allowed_users: Vec::new(),
            api_base: default_telegram_api_base(),
        }
    }
}
