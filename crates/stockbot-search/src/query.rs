//! Query normalization.

/// A user query: the trimmed text as typed plus its case-folded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    folded: String,
}

impl Query {
    /// The trimmed text as the user typed it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The case-folded form used for all comparisons.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }
}

/// Normalize raw user input. Total and deterministic.
pub fn normalize(raw: &str) -> Query {
    let raw = raw.trim().to_string();
    let folded = fold(&raw);
    Query { raw, folded }
}

/// Case-fold `text` for comparison: trim, collapse inner whitespace, upper-case.
///
/// Field values go through the same function so both sides of every
/// comparison agree.
pub fn fold(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
