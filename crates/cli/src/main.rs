//! # ferrous-doh
//!
//! Queries several DNS-over-HTTPS resolvers side by side and keeps a
//! per-user lookup history.

mod bootstrap;
mod commands;
mod di;
mod render;
mod shell;

use clap::{Parser, Subcommand, ValueEnum};
use ferrous_doh_domain::{CliOverrides, RecordType};
use std::str::FromStr;
use tracing::info;

use bootstrap::{init_logging, load_config};
use di::AppContext;
use render::{Palette, Renderer};
use shell::Shell;

#[derive(Parser)]
#[command(name = "ferrous-doh")]
#[command(version)]
#[command(about = "Compare DNS-over-HTTPS answers from several resolvers")]
struct Cli {
    /// Path to the TOML config file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Directory for persisted state and cookies
    #[arg(long)]
    state_dir: Option<String>,

    /// Directory receiving exported result files
    #[arg(long)]
    export_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Query every provider for one hostname
    Check {
        hostname: String,

        /// Record type
        #[arg(short = 't', long = "type", default_value = "A", value_parser = parse_record_type)]
        record_type: RecordType,

        /// Also write the results to dns-results-<ms>.json
        #[arg(long)]
        export: bool,

        /// Print compact JSON instead of the formatted view
        #[arg(long)]
        json: bool,
    },
    /// Show or edit the lookup history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Show or set the colour theme
    Theme {
        #[arg(value_enum, default_value = "show")]
        mode: ThemeMode,
    },
    /// List supported record types
    Types,
    /// Interactive session (default)
    Shell {
        #[arg(short = 't', long = "type", default_value = "A", value_parser = parse_record_type)]
        record_type: RecordType,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List entries, most recent first
    List,
    /// Delete entry N (as numbered by `list`)
    Delete { number: usize },
    /// Erase history and rotate the user token
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeMode {
    Dark,
    Light,
    Toggle,
    Show,
}

fn parse_record_type(raw: &str) -> Result<RecordType, String> {
    RecordType::from_str(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        state_dir: cli.state_dir,
        export_dir: cli.export_dir,
        log_level: cli.log_level,
    };
    let config = load_config(cli.config.as_deref(), overrides)?;
    init_logging(&config);

    info!(providers = config.providers.len(), "Starting ferrous-doh");

    let ctx = AppContext::build(&config).await?;
    let palette = Palette::for_theme(ctx.theme.is_dark().await);
    let renderer = Renderer::new(palette);
    let session = &ctx.session;

    match cli.command.unwrap_or(Command::Shell {
        record_type: RecordType::default(),
    }) {
        Command::Check {
            hostname,
            record_type,
            export,
            json,
        } => {
            let _derivation = session.start();
            if json {
                session.submit(&hostname, record_type).await;
                println!("{}", session.results().await.to_compact_json());
            } else {
                commands::check(session, &renderer, &hostname, record_type).await;
            }
            if export {
                commands::export(session).await;
            }
        }
        Command::History { action } => {
            session.initialize().await;
            match action.unwrap_or(HistoryAction::List) {
                HistoryAction::List => println!("{}", renderer.history(&session.history().await)),
                HistoryAction::Delete { number } => {
                    let removed = match number.checked_sub(1) {
                        Some(index) => session.delete_history_entry(index).await.ok(),
                        None => None,
                    };
                    match removed {
                        Some(entry) => println!("Deleted {} {}", entry.query, entry.record_type),
                        None => anyhow::bail!("No history entry {number}"),
                    }
                }
                HistoryAction::Clear => {
                    session.clear_history().await;
                    println!("History cleared");
                }
            }
        }
        Command::Theme { mode } => {
            let dark = match mode {
                ThemeMode::Dark => {
                    ctx.theme.set_dark(true).await;
                    true
                }
                ThemeMode::Light => {
                    ctx.theme.set_dark(false).await;
                    false
                }
                ThemeMode::Toggle => ctx.theme.toggle().await,
                ThemeMode::Show => ctx.theme.is_dark().await,
            };
            println!("Theme: {}", if dark { "dark" } else { "light" });
        }
        Command::Types => println!("{}", renderer.record_types()),
        Command::Shell { record_type } => {
            let _derivation = session.start();
            Shell::new(session, &ctx.theme, palette, record_type)
                .run()
                .await?;
        }
    }

    Ok(())
}
