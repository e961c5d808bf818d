//! Query → reply text.
//!
//! The one function every channel calls. It always produces a non-empty
//! reply: data problems become a user-facing error message, never a panic
//! or silence.

use crate::format::{FormatOptions, Formatter};
use crate::i18n;
use crate::matcher::{list_codes, Matcher};
use crate::query::normalize;
use crate::rules::Reserved;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use stockbot_core::config::Config;
use stockbot_core::error::BotError;
use stockbot_core::traits::DataSource;
use tracing::{debug, warn};

pub struct Responder {
    matcher: Matcher,
    options: FormatOptions,
    display_limit: usize,
    lang: String,
    bot_name: String,
    source: Arc<dyn DataSource>,
}

impl Responder {
    pub fn new(config: &Config, source: Arc<dyn DataSource>) -> Self {
        Self {
            matcher: Matcher::new(&config.search),
            options: FormatOptions::from(&config.search),
            display_limit: config.search.display_limit,
            lang: config.bot.language.clone(),
            bot_name: config.bot.name.clone(),
            source,
        }
    }

    pub fn source(&self) -> &Arc<dyn DataSource> {
        &self.source
    }

    /// Reply to `text` as of the local calendar date.
    pub async fn reply(&self, text: &str) -> String {
        self.reply_on(text, Local::now().date_naive()).await
    }

    /// Reply to `text`, computing storage ages against `today`.
    pub async fn reply_on(&self, text: &str, today: NaiveDate) -> String {
        let query = normalize(text);
        let formatter = Formatter::new(&self.lang, self.options, today);

        if query.is_empty() {
            return self.help();
        }

        match self.matcher.rules().reserved(&query) {
            Some(Reserved::Help) => return self.help(),
            Some(Reserved::Test) => return i18n::t("test_ok", &self.lang).to_string(),
            Some(Reserved::List) => {
                return match self.load().await {
                    Ok(records) => formatter.code_list(&list_codes(&records)),
                    Err(e) => self.load_error(&e),
                };
            }
            None => {}
        }

        let records = match self.load().await {
            Ok(records) => records,
            Err(e) => return self.load_error(&e),
        };

        let found = self.matcher.find(&query, &records);
        debug!(
            "query '{}' matched {} of {} records",
            query.folded(),
            found.len(),
            records.len()
        );
        if found.is_empty() {
            let suggestions = self.matcher.suggest(&query, &records);
            return formatter.not_found(&query, &suggestions);
        }
        formatter.format(&found, &query, self.display_limit)
    }

    fn help(&self) -> String {
        i18n::help(&self.lang, &self.bot_name, &self.matcher.rules().alias_tokens())
    }

    async fn load(&self) -> Result<Vec<stockbot_core::record::Record>, BotError> {
        self.source.load().await
    }

    fn load_error(&self, err: &BotError) -> String {
        warn!("inventory load failed ({}): {err}", self.source.describe());
        match err {
            BotError::SchemaMismatch { missing } => i18n::schema_mismatch(&self.lang, missing),
            _ => i18n::t("data_unavailable", &self.lang).to_string(),
        }
    }
}
