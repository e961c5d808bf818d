//! Row matching.
//!
//! Order of precedence: alias tokens, then field search across the
//! configured fields. Reserved keywords are resolved by the caller before
//! rows are loaded at all.

use crate::query::{fold, Query};
use crate::rules::RuleTable;
use stockbot_core::config::{MatchMode, SearchConfig};
use stockbot_core::record::{Field, Record};

/// How strongly a field matched. Variants are ordered best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchStrength {
    Exact,
    Prefix,
    Contains,
}

impl MatchStrength {
    /// Compare a folded field value against a folded query.
    pub fn of(field: &str, query: &str) -> Option<Self> {
        if field == query {
            Some(Self::Exact)
        } else if field.starts_with(query) {
            Some(Self::Prefix)
        } else if field.contains(query) {
            Some(Self::Contains)
        } else {
            None
        }
    }

    fn accepted_by(self, mode: MatchMode) -> bool {
        match mode {
            MatchMode::Exact => self == Self::Exact,
            MatchMode::Prefix => self <= Self::Prefix,
            MatchMode::Contains => true,
        }
    }
}

/// Query → ordered rows, driven by the rule table and search config.
#[derive(Debug, Clone)]
pub struct Matcher {
    rules: RuleTable,
    mode: MatchMode,
    fields: Vec<Field>,
    suggestion_limit: usize,
}

impl Matcher {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            rules: RuleTable::new(&config.aliases),
            mode: config.match_mode,
            fields: config.search_fields.clone(),
            suggestion_limit: config.suggestion_limit,
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Rows matching `query`, best match first.
    ///
    /// Alias tokens keep source order. Field search ranks each row by its
    /// strongest field match; ties keep source order.
    pub fn find<'a>(&self, query: &Query, records: &'a [Record]) -> Vec<&'a Record> {
        if query.is_empty() {
            return Vec::new();
        }

        if let Some(pred) = self.rules.alias(query) {
            return records.iter().filter(|r| pred(*r)).collect();
        }

        let mut ranked: Vec<(MatchStrength, &Record)> = records
            .iter()
            .filter_map(|r| {
                self.best_strength(r, query.folded())
                    .filter(|s| s.accepted_by(self.mode))
                    .map(|s| (s, r))
            })
            .collect();
        // Stable sort keeps source order within a strength.
        ranked.sort_by_key(|(strength, _)| *strength);
        ranked.into_iter().map(|(_, r)| r).collect()
    }

    /// Best strength across the search fields. Absent fields never match.
    fn best_strength(&self, record: &Record, query: &str) -> Option<MatchStrength> {
        self.fields
            .iter()
            .filter_map(|f| record.text(*f))
            .filter_map(|text| MatchStrength::of(&fold(&text), query))
            .min()
    }

    /// Did-you-mean pass: distinct codes containing the query, up to the limit.
    pub fn suggest(&self, query: &Query, records: &[Record]) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }
        let mut out: Vec<String> = Vec::new();
        for code in records.iter().filter_map(|r| r.text(Field::Code)) {
            if out.len() >= self.suggestion_limit {
                break;
            }
            if fold(&code).contains(query.folded()) && !out.contains(&code) {
                out.push(code);
            }
        }
        out
    }
}

/// Every distinct code in the source, sorted.
pub fn list_codes(records: &[Record]) -> Vec<String> {
    let mut codes: Vec<String> = records.iter().filter_map(|r| r.text(Field::Code)).collect();
    codes.sort();
    codes.dedup();
    codes
}
