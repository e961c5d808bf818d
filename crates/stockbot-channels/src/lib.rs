//! # stockbot-channels
//!
//! Messaging platform integrations for stockbot.

pub mod line;
pub mod telegram;
pub mod utils;
