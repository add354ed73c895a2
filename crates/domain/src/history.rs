use crate::dns_query::DnsQuery;
use crate::dns_record::RecordType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of entries kept in a history list.
pub const HISTORY_LIMIT: usize = 50;

/// One past lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(query: impl Into<String>, record_type: RecordType, at: DateTime<Utc>) -> Self {
        Self {
            query: query.into(),
            record_type,
            at,
        }
    }

    pub fn now(query: &DnsQuery) -> Self {
        Self::new(query.domain.as_ref(), query.record_type, Utc::now())
    }

    pub fn to_query(&self) -> Option<DnsQuery> {
        DnsQuery::parse(&self.query, self.record_type)
    }
}

/// Newest-first list of lookups, capped at a fixed length.
///
/// Entries pushed past the cap drop the oldest ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.min(HISTORY_LIMIT)),
            limit: limit.max(1),
        }
    }

    /// Rebuilds a list from persisted entries, keeping only the newest `limit`.
    pub fn from_entries(entries: Vec<HistoryEntry>, limit: usize) -> Self {
        let mut history = Self::with_limit(limit);
        history.entries = entries.into_iter().take(history.limit).collect();
        history
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.limit);
    }

    pub fn remove(&mut self, index: usize) -> Option<HistoryEntry> {
        self.entries.remove(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn from_json(raw: &str, limit: usize) -> Result<Self, serde_json::Error> {
        let entries: Vec<HistoryEntry> = serde_json::from_str(raw)?;
        Ok(Self::from_entries(entries, limit))
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
