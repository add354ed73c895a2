use super::RecordType;
use std::sync::Arc;

/// DNS query (hostname + record type).
/// Uses `Arc<str>` for cheap cloning across the provider fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }

    /// Builds a query from raw user input.
    ///
    /// The hostname is whitespace-trimmed; `None` when nothing is left.
    pub fn parse(raw: &str, record_type: RecordType) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self::new(trimmed, record_type))
    }
}
