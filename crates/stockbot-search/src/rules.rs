//! The rule table: reserved keywords and alias tokens.
//!
//! Reserved keywords are checked first and never reach row filtering.
//! Alias tokens replace literal matching with a fixed set of predicates.

use crate::query::{fold, Query};
use stockbot_core::config::{AliasConfig, AliasOp, AliasRule};
use stockbot_core::record::Record;

/// Keywords answered without (or before) searching rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reserved {
    Help,
    List,
    Test,
}

impl Reserved {
    /// Parse a reserved keyword from a normalized query.
    ///
    /// Accepts a leading `/` and an `@botname` suffix so Telegram-style
    /// commands (`/help@stock_bot`) resolve the same as a bare `HELP`.
    pub fn parse(query: &Query) -> Option<Self> {
        let text = query.folded();
        let (slash, cmd) = match text.strip_prefix('/') {
            Some(rest) => (true, rest.split('@').next().unwrap_or(rest)),
            None => (false, text),
        };
        // `START` is only a keyword as the Telegram `/start` command; a bare
        // START may be an item code.
        match (slash, cmd) {
            (_, "HELP") | (true, "START") => Some(Self::Help),
            (_, "LIST") => Some(Self::List),
            (_, "TEST") => Some(Self::Test),
            _ => None,
        }
    }
}

/// A compiled alias: folded token plus folded predicate values.
#[derive(Debug, Clone)]
struct Alias {
    token: String,
    rules: Vec<AliasRule>,
}

impl Alias {
    fn compile(config: &AliasConfig) -> Self {
        Self {
            token: fold(&config.token),
            rules: config
                .rules
                .iter()
                .map(|r| AliasRule {
                    field: r.field,
                    op: r.op,
                    value: fold(&r.value),
                })
                .collect(),
        }
    }

    /// Any predicate may match. A record missing the field fails that predicate only.
    fn matches(&self, record: &Record) -> bool {
        self.rules.iter().any(|rule| {
            let Some(text) = record.text(rule.field) else {
                return false;
            };
            let text = fold(&text);
            match rule.op {
                AliasOp::Equals => text == rule.value,
                AliasOp::Prefix => text.starts_with(&rule.value),
                AliasOp::Contains => text.contains(&rule.value),
            }
        })
    }
}

/// Reserved keywords plus the configured alias table.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    aliases: Vec<Alias>,
}

impl RuleTable {
    pub fn new(aliases: &[AliasConfig]) -> Self {
        Self {
            aliases: aliases
                .iter()
                .map(Alias::compile)
                .filter(|a| !a.token.is_empty())
                .collect(),
        }
    }

    pub fn reserved(&self, query: &Query) -> Option<Reserved> {
        Reserved::parse(query)
    }

    /// Alias tokens in table order, for the help text.
    pub fn alias_tokens(&self) -> Vec<&str> {
        self.aliases.iter().map(|a| a.token.as_str()).collect()
    }

    /// If `query` is an alias token, return a predicate selecting its records.
    pub fn alias(&self, query: &Query) -> Option<impl Fn(&Record) -> bool + '_> {
        let alias = self.aliases.iter().find(|a| a.token == query.folded())?;
        Some(move |record: &Record| alias.matches(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::normalize;
    use stockbot_core::config::SearchConfig;
    use stockbot_core::record::Field;

    #[test]
    fn test_parse_reserved_keywords() {
        assert_eq!(Reserved::parse(&normalize("help")), Some(Reserved::Help));
        assert_eq!(Reserved::parse(&normalize(" HELP ")), Some(Reserved::Help));
        assert_eq!(Reserved::parse(&normalize("List")), Some(Reserved::List));
        assert_eq!(Reserved::parse(&normalize("test")), Some(Reserved::Test));
        assert_eq!(Reserved::parse(&normalize("/start")), Some(Reserved::Help));
    }

    #[test]
    fn test_parse_reserved_with_botname_suffix() {
        assert_eq!(
            Reserved::parse(&normalize("/help@stock_bot")),
            Some(Reserved::Help)
        );
        assert_eq!(Reserved::parse(&normalize("/list")), Some(Reserved::List));
    }

    #[test]
    fn test_non_reserved_passes_through() {
        assert_eq!(Reserved::parse(&normalize("help me")), None);
        assert_eq!(Reserved::parse(&normalize("FS01")), None);
        assert_eq!(Reserved::parse(&normalize("start")), None);
        assert_eq!(Reserved::parse(&normalize("/unknown")), None);
    }

    #[test]
    fn test_start_only_reserved_as_slash_command() {
        assert_eq!(
            Reserved::parse(&normalize("/start@stock_bot")),
            Some(Reserved::Help)
        );
        assert_eq!(Reserved::parse(&normalize("START")), None);
        assert_eq!(Reserved::parse(&normalize("start ")), None);
    }

    #[test]
    fn test_default_rbf_alias() {
        let table = RuleTable::new(&SearchConfig::default().aliases);
        let pred = table.alias(&normalize("rbf")).unwrap();

        assert!(pred(&Record::new().with(Field::Name, "CÁM GẠO ABC")));
        assert!(pred(&Record::new().with(Field::Name, "cám gạo loại 2")));
        assert!(pred(&Record::new().with(Field::Code, "RBF-02")));
        assert!(!pred(&Record::new().with(Field::Name, "Other")));
        assert!(!pred(&Record::new()));
    }

    #[test]
    fn test_unknown_token_is_not_alias() {
        let table = RuleTable::new(&SearchConfig::default().aliases);
        assert!(table.alias(&normalize("FS")).is_none());
        assert_eq!(table.alias_tokens(), vec!["RBF"]);
    }

    #[test]
    fn test_equals_op() {
        let table = RuleTable::new(&[AliasConfig {
            token: "a1".to_string(),
            rules: vec![AliasRule {
                field: Field::Location,
                op: AliasOp::Equals,
                value: "a1".to_string(),
            }],
        }]);
        let pred = table.alias(&normalize("A1")).unwrap();
        assert!(pred(&Record::new().with(Field::Location, "A1")));
        assert!(!pred(&Record::new().with(Field::Location, "A12")));
    }
}
