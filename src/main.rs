mod api;
mod gateway;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::sync::Arc;
use stockbot_channels::{line::LineChannel, telegram::TelegramChannel};
use stockbot_core::{
    config::{self, shellexpand, BotConfig, Config, SourceKind},
    traits::{Channel, DataSource},
};
use stockbot_search::Responder;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "stockbot",
    version,
    about = "Warehouse inventory lookup bot for LINE and Telegram"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml", env = "STOCKBOT_CONFIG")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway and HTTP server.
    Start,
    /// Show config, data source, and channel readiness.
    Status,
    /// Run one query against the configured data source and print the reply.
    Ask {
        /// The query text.
        #[arg(trailing_var_arg = true)]
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config))?;
    let _log_guard = init_logging(&cfg.bot);

    match cli.command {
        Commands::Start => {
            let channels = build_channels(&cfg)?;
            if channels.is_empty() && !cfg.api.enabled {
                anyhow::bail!(
                    "No channels enabled and the API is disabled. \
                     Enable a channel or [api] in config.toml."
                );
            }
            if cfg.channel.line.as_ref().is_some_and(|l| l.enabled) && !cfg.api.enabled {
                anyhow::bail!(
                    "LINE needs the HTTP server for its webhook. Set [api] enabled = true."
                );
            }

            let source = stockbot_sources::from_config(&cfg.source);
            let responder = Arc::new(Responder::new(&cfg, source));

            println!("📦 {}: starting...", cfg.bot.name);
            let gw = Arc::new(gateway::Gateway::new(channels, responder, cfg.api.clone()));
            gw.run().await?;
        }
        Commands::Status => {
            println!("📦 {}: status\n", cfg.bot.name);
            println!("Config: {}", cli.config);
            println!("Language: {}", cfg.bot.language);
            println!();

            let source = stockbot_sources::from_config(&cfg.source);
            let kind = match cfg.source.kind {
                SourceKind::File => "file",
                SourceKind::Sheet => "sheet",
            };
            println!("  source ({kind}): {}", source.describe());
            match source.load().await {
                Ok(records) => println!("  records: {}", records.len()),
                Err(e) => println!("  records: unavailable ({e})"),
            }
            println!();

            match cfg.channel.line {
                Some(ref line) => println!(
                    "  line: {}",
                    if line.enabled
                        && !line.channel_secret.is_empty()
                        && !line.access_token.is_empty()
                    {
                        "configured"
                    } else if line.enabled {
                        "enabled but missing channel_secret or access_token"
                    } else {
                        "disabled"
                    }
                ),
                None => println!("  line: not configured"),
            }
            match cfg.channel.telegram {
                Some(ref tg) => println!(
                    "  telegram: {}",
                    if tg.enabled && !tg.bot_token.is_empty() {
                        "configured"
                    } else if tg.enabled {
                        "enabled but missing bot_token"
                    } else {
                        "disabled"
                    }
                ),
                None => println!("  telegram: not configured"),
            }
            println!(
                "  api: {}",
                if cfg.api.enabled {
                    format!("{}:{}", cfg.api.host, cfg.api.port)
                } else {
                    "disabled".to_string()
                }
            );
        }
        Commands::Ask { query } => {
            if query.is_empty() {
                anyhow::bail!("no query provided. Usage: stockbot ask <code>");
            }
            let source = stockbot_sources::from_config(&cfg.source);
            let responder = Responder::new(&cfg, source);
            println!("{}", responder.reply(&query.join(" ")).await);
        }
    }

    Ok(())
}

/// Stderr logging, plus a daily rolling file when `log_dir` is set.
///
/// `RUST_LOG` wins over `bot.log_level`. Keep the returned guard alive for
/// the life of the process or buffered file output is lost.
fn init_logging(cfg: &BotConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    let (file_layer, guard) = match cfg.log_dir.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(shellexpand(dir), "stockbot.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

/// Build every enabled channel. Enabled channels with missing credentials are an error.
fn build_channels(cfg: &Config) -> anyhow::Result<HashMap<String, Arc<dyn Channel>>> {
    let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();

    if let Some(ref line) = cfg.channel.line {
        if line.enabled {
            if line.channel_secret.is_empty() || line.access_token.is_empty() {
                anyhow::bail!(
                    "LINE is enabled but channel_secret or access_token is empty. \
                     Set them in config.toml or LINE_CHANNEL_SECRET / LINE_CHANNEL_ACCESS_TOKEN."
                );
            }
            channels.insert("line".to_string(), Arc::new(LineChannel::new(line.clone())));
        }
    }

    if let Some(ref tg) = cfg.channel.telegram {
        if tg.enabled {
            if tg.bot_token.is_empty() {
                anyhow::bail!(
                    "Telegram is enabled but bot_token is empty. \
                     Set it in config.toml or TELEGRAM_BOT_TOKEN env var."
                );
            }
            channels.insert("telegram".to_string(), Arc::new(TelegramChannel::new(tg.clone())));
        }
    }

    Ok(channels)
}
