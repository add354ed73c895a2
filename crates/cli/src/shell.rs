//! Interactive checker session.

use ferrous_doh_application::services::CheckerSession;
use ferrous_doh_application::use_cases::ThemePreferenceUseCase;
use ferrous_doh_domain::RecordType;
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::commands;
use crate::render::{Palette, Renderer};

const HELP: &str = "\
<hostname>                 query every provider with the current type
query <host> [TYPE]        same, optionally switching the type first
type <TYPE>                set the record type
types                      list supported record types
json                       print the results as compact JSON
export                     write results to dns-results-<ms>.json
clear                      clear the results (history is kept)
history                    list past lookups
load <N>                   re-run history entry N
delete <N>                 delete history entry N
clear-history              erase history and rotate the user token
note <text>                attach a note to the results (empty to remove)
theme [dark|light|toggle]  show or switch the colour theme
help                       this text
quit                       leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Query {
        hostname: String,
        record_type: Option<RecordType>,
    },
    SetType(RecordType),
    Types,
    Json,
    Export,
    ClearResults,
    History,
    Load(usize),
    Delete(usize),
    ClearHistory,
    Note(String),
    Theme(Option<bool>),
    ToggleTheme,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        match word {
            "" => Self::Empty,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "types" => Self::Types,
            "json" => Self::Json,
            "export" => Self::Export,
            "clear" => Self::ClearResults,
            "history" => Self::History,
            "clear-history" => Self::ClearHistory,
            "note" => Self::Note(rest.to_string()),
            "type" => match RecordType::from_str(rest) {
                Ok(rt) => Self::SetType(rt),
                Err(e) => Self::Invalid(e.to_string()),
            },
            "load" | "delete" => match commands::history_index(rest) {
                Some(i) if word == "load" => Self::Load(i),
                Some(i) => Self::Delete(i),
                None => Self::Invalid(format!("{word} expects a history number")),
            },
            "theme" => match rest {
                "" => Self::Theme(None),
                "dark" => Self::Theme(Some(true)),
                "light" => Self::Theme(Some(false)),
                "toggle" => Self::ToggleTheme,
                other => Self::Invalid(format!("Unknown theme: {other}")),
            },
            "query" => {
                let mut parts = rest.split_whitespace();
                let hostname = parts.next().unwrap_or_default().to_string();
                match parts.next().map(RecordType::from_str).transpose() {
                    Ok(record_type) => Self::Query {
                        hostname,
                        record_type,
                    },
                    Err(e) => Self::Invalid(e.to_string()),
                }
            }
            _ if rest.is_empty() => Self::Query {
                hostname: word.to_string(),
                record_type: None,
            },
            _ => Self::Invalid(format!("Unknown command: {word} (try `help`)")),
        }
    }
}

pub struct Shell<'a> {
    session: &'a CheckerSession,
    theme: &'a ThemePreferenceUseCase,
    renderer: Renderer,
    record_type: RecordType,
}

impl<'a> Shell<'a> {
    pub fn new(
        session: &'a CheckerSession,
        theme: &'a ThemePreferenceUseCase,
        palette: Palette,
        record_type: RecordType,
    ) -> Self {
        Self {
            session,
            theme,
            renderer: Renderer::new(palette),
            record_type,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("Type a hostname to query, `help` for commands.");

        loop {
            print!("[{}] > ", self.record_type);
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let command = ShellCommand::parse(&line);
            debug!(?command, "Shell command");

            if command == ShellCommand::Quit {
                break;
            }
            self.dispatch(command).await;
        }
        Ok(())
    }

    fn apply_theme(&mut self, dark: bool) {
        self.renderer = Renderer::new(Palette::for_theme(dark));
        println!("Theme: {}", if dark { "dark" } else { "light" });
    }

    async fn dispatch(&mut self, command: ShellCommand) {
        let session = self.session;
        match command {
            ShellCommand::Empty | ShellCommand::Quit => {}
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Invalid(message) => eprintln!("{message}"),
            ShellCommand::Query {
                hostname,
                record_type,
            } => {
                if let Some(rt) = record_type {
                    self.record_type = rt;
                }
                commands::check(session, &self.renderer, &hostname, self.record_type).await;
            }
            ShellCommand::SetType(rt) => {
                self.record_type = rt;
                if let Some(hint) = rt.hostname_hint() {
                    println!("{hint}");
                }
            }
            ShellCommand::Types => println!("{}", self.renderer.record_types()),
            ShellCommand::Json => println!("{}", session.results().await.to_compact_json()),
            ShellCommand::Export => commands::export(session).await,
            ShellCommand::ClearResults => {
                session.clear_results().await;
                println!("Results cleared");
            }
            ShellCommand::History => println!("{}", self.renderer.history(&session.history().await)),
            ShellCommand::Load(index) => match session.history_entry(index).await {
                Some(entry) => {
                    self.record_type = entry.record_type;
                    commands::check(session, &self.renderer, &entry.query, entry.record_type).await;
                }
                None => eprintln!("No history entry {}", index + 1),
            },
            ShellCommand::Delete(index) => match session.delete_history_entry(index).await {
                Ok(entry) => println!("Deleted {} {}", entry.query, entry.record_type),
                Err(_) => eprintln!("No history entry {}", index + 1),
            },
            ShellCommand::ClearHistory => {
                session.clear_history().await;
                println!("History cleared");
            }
            ShellCommand::Note(text) => {
                session.set_notes(text).await;
                println!("{}", commands::render_session(session, &self.renderer).await);
            }
            ShellCommand::Theme(choice) => {
                let dark = match choice {
                    Some(dark) => {
                        self.theme.set_dark(dark).await;
                        dark
                    }
                    None => self.theme.is_dark().await,
                };
                self.apply_theme(dark);
            }
            ShellCommand::ToggleTheme => {
                let dark = self.theme.toggle().await;
                self.apply_theme(dark);
            }
        }
    }
}
