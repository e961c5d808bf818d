//! Message sending.

use super::{TelegramChannel, TELEGRAM_MAX_CHARS};
use crate::utils::split_message;
use stockbot_core::error::BotError;

impl TelegramChannel {
    /// Send a plain-text message to a chat, split into Telegram-sized chunks.
    ///
    /// Replies carry spreadsheet text verbatim, so no parse mode is set.
    pub(crate) async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        let url = format!("{}/sendMessage", self.base_url);

        for chunk in split_message(text, TELEGRAM_MAX_CHARS) {
            let body = serde_json::json!({
                "chat_id": chat_id,
                "text": chunk,
            });

            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| BotError::Channel(format!("telegram send failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                return Err(BotError::Channel(format!(
                    "telegram send failed ({status}): {error_text}"
                )));
            }
        }

        Ok(())
    }
}
