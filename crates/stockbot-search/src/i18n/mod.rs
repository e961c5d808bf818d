//! Internationalization: localized strings for bot replies.
//!
//! Uses a simple `t(key, lang)` function for static strings and
//! the helpers in `format` for strings with interpolation.
//! Supported languages: English (fallback), Vietnamese.

mod format;
mod labels;

#[cfg(test)]
mod tests;

pub use format::*;

/// Return a localized static string for `key` in the given `lang`.
/// Falls back to English for unsupported languages.
pub fn t(key: &str, lang: &str) -> &'static str {
    labels::lookup(key, lang).unwrap_or("???")
}
