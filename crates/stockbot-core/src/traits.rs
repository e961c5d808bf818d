use crate::{
    error::BotError,
    message::{IncomingMessage, OutgoingMessage},
    record::Record,
};
use async_trait::async_trait;

/// Messaging Channel trait.
///
/// Every messaging platform (LINE, Telegram) implements this trait to
/// receive and send messages.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    /// Returns a receiver that yields incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, BotError>;

    /// Send a response back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), BotError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), BotError>;

    /// Downcast hook for channel-specific endpoints (e.g. the LINE webhook).
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Tabular inventory source.
///
/// Implementations reload the full snapshot on every call; nothing is cached.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short description for logs and `/api/health` (e.g. a file path or URL).
    fn describe(&self) -> String;

    /// Load every record currently in the source.
    async fn load(&self) -> Result<Vec<Record>, BotError>;
}
