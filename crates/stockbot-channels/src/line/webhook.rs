//! Webhook signature verification and event parsing.

use super::types::WebhookBody;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use stockbot_core::error::BotError;
use stockbot_core::message::IncomingMessage;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Check `X-Line-Signature`: base64 HMAC-SHA256 of the raw body keyed by
/// the channel secret. The comparison is constant-time.
pub fn verify_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    let Ok(expected) = BASE64.decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Compute the signature LINE would send for `body`.
pub fn sign(secret: &str, body: &[u8]) -> Result<String, BotError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| BotError::Channel(format!("invalid LINE channel secret: {e}")))?;
    mac.update(body);
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Text message events from a webhook body. Other events are skipped.
///
/// The reply token becomes the reply target; the sender is the user id,
/// falling back to the group or room id.
pub fn parse_events(body: &[u8]) -> Result<Vec<IncomingMessage>, BotError> {
    let body: WebhookBody = serde_json::from_slice(body)?;

    let mut out = Vec::new();
    for event in body.events {
        if event.event_type != "message" {
            debug!("line: skipping {} event", event.event_type);
            continue;
        }
        let Some(message) = event.message else {
            continue;
        };
        let Some(text) = message.text.filter(|_| message.message_type == "text") else {
            debug!("line: skipping {} message", message.message_type);
            continue;
        };
        let Some(reply_token) = event.reply_token else {
            continue;
        };
        let sender = event
            .source
            .and_then(|s| s.user_id.or(s.group_id).or(s.room_id))
            .unwrap_or_default();

        out.push(IncomingMessage::text("line", &sender, &text, Some(reply_token)));
    }
    Ok(out)
}
