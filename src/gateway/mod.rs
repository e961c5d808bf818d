//! Gateway: the main event loop connecting channels to the responder.
//!
//! Every channel's receiver is forwarded into one queue; each message is
//! answered on its own task. The HTTP server runs alongside and is aborted
//! on shutdown.

mod pipeline;


use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use stockbot_core::{
    config::ApiConfig,
    message::{IncomingMessage, OutgoingMessage},
    traits::Channel,
};
use stockbot_search::Responder;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Routes messages between channels and the responder.
pub struct Gateway {
    pub(super) channels: HashMap<String, Arc<dyn Channel>>,
    pub(super) responder: Arc<Responder>,
    pub(super) api_config: ApiConfig,
    pub(super) uptime: Instant,
}

impl Gateway {
    pub fn new(
        channels: HashMap<String, Arc<dyn Channel>>,
        responder: Arc<Responder>,
        api_config: ApiConfig,
    ) -> Self {
        Self {
            channels,
            responder,
            api_config,
            uptime: Instant::now(),
        }
    }

    /// Run the main event loop until Ctrl-C.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        info!(
            "Stockbot gateway running | source: {} | channels: {} | api: {}",
            self.responder.source().describe(),
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
            if self.api_config.enabled {
                format!("{}:{}", self.api_config.host, self.api_config.port)
            } else {
                "disabled".to_string()
            },
        );

        let (tx, mut rx) = mpsc::channel::<IncomingMessage>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(msg) = channel_rx.recv().await {
                    if tx.send(msg).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        // Spawn HTTP server (LINE webhook, health, query API).
        let api_handle = if self.api_config.enabled {
            let api_cfg = self.api_config.clone();
            let api_channels = self.channels.clone();
            let api_responder = self.responder.clone();
            let api_uptime = self.uptime;
            Some(tokio::spawn(async move {
                crate::api::serve(api_cfg, api_channels, api_responder, api_uptime).await;
            }))
        } else {
            None
        };

        // Main event loop with graceful shutdown.
        loop {
            tokio::select! {
                Some(incoming) = rx.recv() => {
                    let gw = self.clone();
                    tokio::spawn(async move {
                        gw.handle_message(incoming).await;
                    });
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown(&api_handle).await;
        Ok(())
    }

    /// Graceful shutdown: stop the HTTP server, then every channel.
    async fn shutdown(&self, api_handle: &Option<JoinHandle<()>>) {
        info!("Shutting down...");

        if let Some(h) = api_handle {
            h.abort();
        }

        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                warn!("failed to stop channel {name}: {e}");
            }
        }

        info!("Shutdown complete.");
    }

    /// Send a plain text message back to the sender.
    async fn send_text(&self, incoming: &IncomingMessage, text: &str) {
        let msg = OutgoingMessage {
            text: text.to_string(),
            reply_target: incoming.reply_target.clone(),
        };

        match self.channels.get(&incoming.channel) {
            Some(channel) => {
                if let Err(e) = channel.send(msg).await {
                    error!("failed to send message: {e}");
                }
            }
            None => warn!("no channel named '{}' to reply on", incoming.channel),
        }
    }
}
