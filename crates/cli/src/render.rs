//! Terminal rendering of results, history and record types.

use ferrous_doh_application::services::ProviderStatus;
use ferrous_doh_domain::doh_response::{answer_rows, has_answers, pretty_answers};
use ferrous_doh_domain::{HistoryEntry, Provider, QueryResult, RecordType, ResultMap};
use std::fmt::Write;

/// ANSI colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub heading: &'static str,
    pub ok: &'static str,
    pub error: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub const DARK: Palette = Palette {
        heading: "\x1b[1;96m",
        ok: "\x1b[92m",
        error: "\x1b[91m",
        muted: "\x1b[37m",
        reset: "\x1b[0m",
    };

    pub const LIGHT: Palette = Palette {
        heading: "\x1b[1;34m",
        ok: "\x1b[32m",
        error: "\x1b[31m",
        muted: "\x1b[90m",
        reset: "\x1b[0m",
    };

    pub const PLAIN: Palette = Palette {
        heading: "",
        ok: "",
        error: "",
        muted: "",
        reset: "",
    };

    pub fn for_theme(dark: bool) -> Self {
        if dark {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }
}

pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// One block per provider in configured order, then a summary line.
    pub fn results(
        &self,
        providers: &[Provider],
        results: &ResultMap,
        statuses: &[ProviderStatus],
        notes: &str,
    ) -> String {
        let p = self.palette;
        let mut out = String::new();

        for (provider, status) in providers.iter().zip(statuses) {
            let _ = write!(out, "{}{}{}  ", p.heading, provider.name, p.reset);
            match status {
                ProviderStatus::Idle => {
                    let _ = writeln!(out, "{}-{}", p.muted, p.reset);
                }
                ProviderStatus::Loading => {
                    let _ = writeln!(out, "{}loading...{}", p.muted, p.reset);
                }
                ProviderStatus::Success | ProviderStatus::Error(_) => {
                    if let Some(result) = results.get(&provider.id) {
                        self.result_block(&mut out, result);
                    }
                }
            }
        }

        let succeeded = results.values().filter(|r| r.ok).count();
        let _ = write!(
            out,
            "{}{} of {} providers answered{}",
            p.muted,
            succeeded,
            results.len(),
            p.reset
        );
        if !notes.is_empty() {
            let _ = write!(out, "\n{}note:{} {}", p.muted, p.reset, notes);
        }
        out
    }

    fn result_block(&self, out: &mut String, result: &QueryResult) {
        let p = self.palette;

        if !result.ok {
            let _ = writeln!(
                out,
                "{}error{} {} {}({} ms){}",
                p.error,
                p.reset,
                result.error().unwrap_or_default(),
                p.muted,
                result.took,
                p.reset
            );
            return;
        }

        let _ = writeln!(out, "{}ok{} {}({} ms){}", p.ok, p.reset, p.muted, result.took, p.reset);

        let Some(json) = result.json() else {
            let _ = writeln!(out, "  (no data)");
            return;
        };

        let rows = answer_rows(json);
        if rows.is_empty() {
            if !has_answers(json) {
                let _ = writeln!(out, "  {}no answers{}", p.muted, p.reset);
            }
            for line in pretty_answers(Some(json)) {
                let _ = writeln!(out, "  {line}");
            }
            return;
        }

        for row in rows {
            let ttl = row.ttl_label();
            let _ = write!(out, "  {}  {}", row.name, row.data);
            if !ttl.is_empty() {
                let _ = write!(out, "  {}{}{}", p.muted, ttl, p.reset);
            }
            out.push('\n');
        }
    }

    /// Most recent first, numbered from 1.
    pub fn history(&self, entries: &[HistoryEntry]) -> String {
        let p = self.palette;
        if entries.is_empty() {
            return format!("{}No history yet{}", p.muted, p.reset);
        }
        entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                format!(
                    "{:>3}. {} {}{}{} {}{}{}",
                    i + 1,
                    e.query,
                    p.heading,
                    e.record_type,
                    p.reset,
                    p.muted,
                    e.at.format("%Y-%m-%d %H:%M:%S"),
                    p.reset
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn record_types(&self) -> String {
        RecordType::all()
            .iter()
            .map(|rt| match rt.hostname_hint() {
                Some(hint) => format!(
                    "{:<6} {}{hint}{}",
                    rt.as_str(),
                    self.palette.muted,
                    self.palette.reset
                ),
                None => rt.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
