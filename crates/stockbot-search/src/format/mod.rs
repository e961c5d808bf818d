//! Reply rendering.
//!
//! A reply is a header, one block per shown record, and an optional
//! "N more" note. The whole reply is kept within the platform's per-message
//! character limit: records that would overflow it are counted in the note
//! instead of being rendered.

pub mod numbers;

use crate::age::{storage_age, StorageAge};
use crate::i18n;
use crate::query::Query;
use chrono::NaiveDate;
use numbers::truncate_chars;
use stockbot_core::config::SearchConfig;
use stockbot_core::record::{CellValue, Field, Record};

/// Longest query echoed back in a results header or not-found reply.
const QUERY_ECHO_MAX_CHARS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub name_max_chars: usize,
    pub remark_max_chars: usize,
    /// Hard upper bound on reply length, in characters.
    pub reply_max_chars: usize,
}

impl From<&SearchConfig> for FormatOptions {
    fn from(cfg: &SearchConfig) -> Self {
        Self {
            name_max_chars: cfg.name_max_chars,
            remark_max_chars: cfg.remark_max_chars,
            reply_max_chars: cfg.reply_max_chars,
        }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

/// Renders matches into reply text for one language and one reference date.
#[derive(Debug, Clone)]
pub struct Formatter {
    lang: String,
    options: FormatOptions,
    today: NaiveDate,
}

impl Formatter {
    pub fn new(lang: &str, options: FormatOptions, today: NaiveDate) -> Self {
        Self {
            lang: lang.to_string(),
            options,
            today,
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Render `records` as a reply, showing at most `limit` blocks (0 = no cap).
    ///
    /// Never returns an empty string: no records yields the not-found message.
    pub fn format(&self, records: &[&Record], query: &Query, limit: usize) -> String {
        if records.is_empty() {
            return self.not_found(query, &[]);
        }

        let total = records.len();
        let budget = self.options.reply_max_chars;
        let cap = if limit == 0 { total } else { limit.min(total) };

        let header_query = truncate_chars(query.folded(), QUERY_ECHO_MAX_CHARS);
        let mut out = i18n::results_header(&self.lang, &header_query, total);
        let mut used = out.chars().count();
        let mut shown = 0;

        for record in records.iter().take(cap) {
            let block = self.render_block(record);
            let block_len = 2 + block.chars().count();
            let hidden_after = total - shown - 1;
            let note_len = if hidden_after > 0 {
                2 + i18n::more_results(&self.lang, hidden_after).chars().count()
            } else {
                0
            };
            if used + block_len + note_len > budget {
                break;
            }
            out.push_str("\n\n");
            out.push_str(&block);
            used += block_len;
            shown += 1;
        }

        let hidden = total - shown;
        if hidden > 0 {
            out.push_str("\n\n");
            out.push_str(&i18n::more_results(&self.lang, hidden));
        }

        // Only reachable with a budget smaller than the header itself.
        truncate_chars(&out, budget)
    }

    /// The not-found reply, echoing the query as the user typed it.
    pub fn not_found(&self, query: &Query, suggestions: &[String]) -> String {
        let echoed = truncate_chars(query.raw(), QUERY_ECHO_MAX_CHARS);
        let reply = i18n::not_found(&self.lang, &echoed, suggestions);
        truncate_chars(&reply, self.options.reply_max_chars)
    }

    /// LIST reply: every code, one per line, within the character budget.
    pub fn code_list(&self, codes: &[String]) -> String {
        if codes.is_empty() {
            return i18n::t("list_empty", &self.lang).to_string();
        }
        let header = i18n::code_list_header(&self.lang, codes.len());
        let footer = i18n::code_list_footer(&self.lang);
        let budget = self
            .options
            .reply_max_chars
            .saturating_sub(header.chars().count() + footer.chars().count() + 4);

        let mut body = String::new();
        let mut used = 0;
        for (i, code) in codes.iter().enumerate() {
            let line = format!("\n• {code}");
            let line_len = line.chars().count();
            let hidden_after = codes.len() - i - 1;
            let note_len = if hidden_after > 0 {
                1 + i18n::more_results(&self.lang, hidden_after).chars().count()
            } else {
                0
            };
            if used + line_len + note_len > budget {
                body.push('\n');
                body.push_str(&i18n::more_results(&self.lang, codes.len() - i));
                break;
            }
            body.push_str(&line);
            used += line_len;
        }

        truncate_chars(
            &format!("{header}{body}\n\n{footer}"),
            self.options.reply_max_chars,
        )
    }

    /// One record block. Absent fields render as a placeholder.
    pub fn render_block(&self, record: &Record) -> String {
        let lang = self.lang.as_str();
        let placeholder = i18n::t("placeholder", lang);
        let text_or = |field: Field| record.text(field).unwrap_or_else(|| placeholder.to_string());

        let name = record
            .text(Field::Name)
            .map(|n| truncate_chars(&n, self.options.name_max_chars))
            .unwrap_or_else(|| placeholder.to_string());

        let quantity = match record.get(Field::Quantity) {
            Some(v) => v
                .as_number()
                .map(numbers::quantity)
                .unwrap_or_else(|| v.to_string()),
            None => placeholder.to_string(),
        };

        let weight = match record.get(Field::Weight) {
            Some(v) => v
                .as_number()
                .map(|w| format!("{}kg", numbers::weight(w)))
                .unwrap_or_else(|| v.to_string()),
            None => placeholder.to_string(),
        };

        let date_in = record
            .get(Field::DateIn)
            .map(|v| match crate::age::parse_date(v) {
                Some(d) => d.format("%d/%m/%Y").to_string(),
                None => v.to_string(),
            })
            .unwrap_or_else(|| placeholder.to_string());

        let age = match storage_age(record, self.today) {
            StorageAge::Days(n) => i18n::days(lang, n),
            StorageAge::Unknown => i18n::t("age_unknown", lang).to_string(),
            StorageAge::NoDate => i18n::t("age_no_date", lang).to_string(),
        };

        let remark = record
            .get(Field::Remark)
            .map(CellValue::to_string)
            .map(|r| truncate_chars(&r, self.options.remark_max_chars))
            .unwrap_or_else(|| i18n::t("no_remark", lang).to_string());

        format!(
            "┌─ {}: {}\n\
             ├─ {}: {name}\n\
             ├─ {}: {}\n\
             ├─ {}: {quantity}\n\
             ├─ {}: {weight}\n\
             ├─ {}: {date_in}\n\
             ├─ {}: {age}\n\
             └─ {}: {remark}",
            i18n::t("label_code", lang),
            text_or(Field::Code),
            i18n::t("label_name", lang),
            i18n::t("label_location", lang),
            text_or(Field::Location),
            i18n::t("label_quantity", lang),
            i18n::t("label_weight", lang),
            i18n::t("label_date_in", lang),
            i18n::t("label_storage_age", lang),
            i18n::t("label_remark", lang),
        )
    }
}
