//! # stockbot-core
//!
//! Core types, traits, configuration, and error handling for stockbot.

pub mod config;
pub mod error;
pub mod message;
pub mod record;
pub mod traits;
