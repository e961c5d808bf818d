//! # stockbot-search
//!
//! The keyword-match-and-format layer: normalize a user's query, decide
//! which inventory rows match it, and render them into a bounded reply.

pub mod age;
pub mod format;
pub mod i18n;
pub mod matcher;
pub mod query;
pub mod responder;
pub mod rules;

pub use format::{FormatOptions, Formatter};
pub use matcher::Matcher;
pub use query::{normalize, Query};
pub use responder::Responder;
pub use rules::{Reserved, RuleTable};
