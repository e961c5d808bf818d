//! LINE Messaging API channel.
//!
//! Inbound events are pushed to `/webhook` by LINE and handed to
//! [`LineChannel::ingest`] by the HTTP server. Replies use the reply
//! endpoint with the event's reply token.
//! Docs: <https://developers.line.biz/en/reference/messaging-api/>

mod types;
pub mod webhook;

#[cfg(test)]
mod tests;

use crate::utils::split_message;
use async_trait::async_trait;
use stockbot_core::{
    config::LineConfig,
    error::BotError,
    message::{IncomingMessage, OutgoingMessage},
    traits::Channel,
};
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};
use types::{ReplyRequest, TextMessage};

/// LINE's per-message character limit.
pub const LINE_MAX_CHARS: usize = 5000;

/// Messages accepted by one reply call.
pub const LINE_MAX_MESSAGES: usize = 5;

/// LINE channel: webhook inbound, reply-API outbound.
pub struct LineChannel {
    config: LineConfig,
    client: reqwest::Client,
    tx: Mutex<Option<mpsc::Sender<IncomingMessage>>>,
}

impl LineChannel {
    pub fn new(config: LineConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            tx: Mutex::new(None),
        }
    }

    /// Verify a webhook request against the channel secret.
    pub fn verify_signature(&self, body: &[u8], signature: &str) -> bool {
        webhook::verify_signature(&self.config.channel_secret, body, signature)
    }

    /// Forward the text messages of a verified webhook body to the gateway.
    ///
    /// Returns how many messages were forwarded.
    pub async fn ingest(&self, body: &[u8]) -> Result<usize, BotError> {
        let messages = webhook::parse_events(body)?;
        let guard = self.tx.lock().await;
        let tx = guard
            .as_ref()
            .ok_or_else(|| BotError::Channel("line channel not started".into()))?;

        let count = messages.len();
        for msg in messages {
            tx.send(msg)
                .await
                .map_err(|_| BotError::Channel("line channel receiver dropped".into()))?;
        }
        Ok(count)
    }

    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), BotError> {
        let mut chunks = split_message(text, LINE_MAX_CHARS);
        if chunks.len() > LINE_MAX_MESSAGES {
            warn!(
                "line reply has {} chunks, sending the first {LINE_MAX_MESSAGES}",
                chunks.len()
            );
            chunks.truncate(LINE_MAX_MESSAGES);
        }

        let request = ReplyRequest {
            reply_token,
            messages: chunks
                .into_iter()
                .map(|text| TextMessage {
                    message_type: "text",
                    text,
                })
                .collect(),
        };

        let url = format!(
            "{}/v2/bot/message/reply",
            self.config.api_base.trim_end_matches('/')
        );
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Channel(format!("line reply failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(BotError::Channel(format!(
                "line reply failed ({status}): {error_text}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Channel for LineChannel {
    fn name(&self) -> &str {
        "line"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, BotError> {
        if self.config.channel_secret.is_empty() {
            return Err(BotError::Config("line channel_secret is not set".into()));
        }
        if self.config.access_token.is_empty() {
            warn!("line access_token is not set; replies will be rejected");
        }
        let (tx, rx) = mpsc::channel(64);
        *self.tx.lock().await = Some(tx);
        info!("LINE channel ready for webhook events");
        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), BotError> {
        let reply_token = message
            .reply_target
            .as_deref()
            .ok_or_else(|| BotError::Channel("no reply token on outgoing message".into()))?;
        self.reply(reply_token, &message.text).await
    }

    async fn stop(&self) -> Result<(), BotError> {
        self.tx.lock().await.take();
        info!("LINE channel stopped");
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
