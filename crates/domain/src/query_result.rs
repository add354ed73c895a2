use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// What a single provider returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryOutcome {
    /// Parsed JSON body of a successful response, kept verbatim.
    Json(Value),
    /// Error description for a failed request.
    Error(String),
}

/// Outcome of one provider lookup within a batch.
///
/// Serializes as `{"ok", "provider", "name", "took", "json" | "error"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub ok: bool,
    pub provider: Arc<str>,
    pub name: Arc<str>,
    /// Elapsed wall-clock time in whole milliseconds.
    pub took: u64,
    #[serde(flatten)]
    pub outcome: QueryOutcome,
}

impl QueryResult {
    pub fn success(provider: &Provider, took: u64, json: Value) -> Self {
        Self {
            ok: true,
            provider: Arc::clone(&provider.id),
            name: Arc::clone(&provider.name),
            took,
            outcome: QueryOutcome::Json(json),
        }
    }

    pub fn failure(provider: &Provider, took: u64, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            provider: Arc::clone(&provider.id),
            name: Arc::clone(&provider.name),
            took,
            outcome: QueryOutcome::Error(error.into()),
        }
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.outcome {
            QueryOutcome::Json(v) => Some(v),
            QueryOutcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            QueryOutcome::Json(_) => None,
            QueryOutcome::Error(e) => Some(e),
        }
    }
}

/// Provider id → result for one settled batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultMap(BTreeMap<Arc<str>, QueryResult>);

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, result: QueryResult) {
        self.0.insert(Arc::clone(&result.provider), result);
    }

    pub fn get(&self, provider_id: &str) -> Option<&QueryResult> {
        self.0.get(provider_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn values(&self) -> impl Iterator<Item = &QueryResult> {
        self.0.values()
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn to_compact_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl FromIterator<QueryResult> for ResultMap {
    fn from_iter<I: IntoIterator<Item = QueryResult>>(iter: I) -> Self {
        let mut map = ResultMap::new();
        for result in iter {
            map.insert(result);
        }
        map
    }
}
