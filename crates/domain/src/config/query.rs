use serde::{Deserialize, Serialize};

use crate::history::HISTORY_LIMIT;

/// Lookup settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Per-request timeout for DoH providers in milliseconds (default: 10000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of history entries kept per user (default: 50)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_history_limit() -> usize {
    HISTORY_LIMIT
}
