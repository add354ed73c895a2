//! Read-only views over the JSON bodies returned by DoH providers.
//!
//! Bodies are trusted verbatim and never validated as DNS messages; every
//! accessor here tolerates missing or oddly-typed fields and falls back to
//! the raw JSON text instead of failing.

use crate::dns_record::RecordType;
use serde_json::Value;

/// One answer record, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRow {
    pub name: String,
    pub record_type: String,
    pub data: String,
    pub ttl: Option<i64>,
}

impl AnswerRow {
    pub fn from_value(answer: &Value) -> Self {
        let name = answer
            .get("name")
            .map(value_to_text)
            .unwrap_or_default();
        let data = ["data", "rdata", "RDATA"]
            .iter()
            .filter_map(|k| answer.get(*k))
            .map(value_to_text)
            .find(|s| !s.is_empty())
            .unwrap_or_default();
        let ttl = answer
            .get("TTL")
            .or_else(|| answer.get("ttl"))
            .and_then(Value::as_i64);

        Self {
            name,
            record_type: answer.get("type").map(type_label).unwrap_or_default(),
            data,
            ttl,
        }
    }

    /// Human-friendly TTL, empty when absent.
    pub fn ttl_label(&self) -> String {
        self.ttl.map(format_ttl).unwrap_or_default()
    }
}

/// `Answer` array of a response, if present.
pub fn answers(json: &Value) -> Option<&Vec<Value>> {
    json.get("Answer").and_then(Value::as_array)
}

/// True when the payload carries at least one answer record.
pub fn has_answers(json: &Value) -> bool {
    ["Answer", "Answers"].iter().any(|k| {
        json.get(*k)
            .and_then(Value::as_array)
            .is_some_and(|a| !a.is_empty())
    })
}

pub fn answer_rows(json: &Value) -> Vec<AnswerRow> {
    answers(json)
        .map(|list| list.iter().map(AnswerRow::from_value).collect())
        .unwrap_or_default()
}

/// One text line per record: `name TTLs type data`.
///
/// Falls back to the `Authority` section, then `Answers`, then the raw body.
pub fn pretty_answers(json: Option<&Value>) -> Vec<String> {
    let Some(json) = json else {
        return vec!["(no data)".to_string()];
    };

    if let Some(list) = answers(json) {
        return list
            .iter()
            .map(|a| {
                let row = AnswerRow::from_value(a);
                let ttl = row.ttl.map(|t| format!("{t}s")).unwrap_or_default();
                let data = if row.data.is_empty() {
                    a.to_string()
                } else {
                    row.data
                };
                format!("{} {} {} {}", row.name, ttl, row.record_type, data)
            })
            .collect();
    }

    for section in ["Authority", "Answers"] {
        if let Some(list) = json.get(section).and_then(Value::as_array) {
            return list.iter().map(Value::to_string).collect();
        }
    }

    vec![json.to_string()]
}

/// Formats a TTL as seconds, minutes or hours. Zero and negative TTLs
/// render as an empty string.
pub fn format_ttl(seconds: i64) -> String {
    if seconds <= 0 {
        return String::new();
    }
    if seconds < 60 {
        return format!("{seconds} seconds");
    }
    if seconds < 3600 {
        let minutes = seconds / 60;
        return format!("{minutes} {}", if minutes == 1 { "minute" } else { "minutes" });
    }
    let hours = seconds / 3600;
    format!("{hours} {}", if hours == 1 { "hour" } else { "hours" })
}

fn value_to_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn type_label(v: &Value) -> String {
    match v.as_u64().and_then(|n| u16::try_from(n).ok()) {
        Some(n) => RecordType::from_u16(n)
            .map(|rt| rt.as_str().to_string())
            .unwrap_or_else(|| n.to_string()),
        None => value_to_text(v),
    }
}
