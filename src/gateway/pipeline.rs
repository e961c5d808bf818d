//! Per-message handling.

use super::Gateway;
use std::time::Instant;
use stockbot_core::message::IncomingMessage;
use tracing::info;

impl Gateway {
    /// Answer one message on the channel it came from.
    pub(super) async fn handle_message(&self, incoming: IncomingMessage) {
        let preview = if incoming.text.chars().count() > 60 {
            let truncated: String = incoming.text.chars().take(60).collect();
            format!("{truncated}...")
        } else {
            incoming.text.clone()
        };
        info!(
            "[{}] {} asks: {}",
            incoming.channel,
            incoming.sender_name.as_deref().unwrap_or(&incoming.sender_id),
            preview
        );

        let started = Instant::now();
        let reply = self.responder.reply(&incoming.text).await;
        info!(
            "[{}] replied with {} chars in {}ms",
            incoming.channel,
            reply.chars().count(),
            started.elapsed().as_millis()
        );

        self.send_text(&incoming, &reply).await;
    }
}
