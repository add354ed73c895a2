use crate::errors::DomainError;
use crate::query_result::ResultMap;

/// A downloadable snapshot of the current result map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

impl ExportArtifact {
    /// Pretty-printed JSON named `dns-results-<unix-ms>.json`.
    ///
    /// An empty map is refused with `NothingToExport` instead of producing
    /// an empty file.
    pub fn from_results(results: &ResultMap, unix_ms: i64) -> Result<Self, DomainError> {
        if results.is_empty() {
            return Err(DomainError::NothingToExport);
        }
        Ok(Self {
            file_name: format!("dns-results-{unix_ms}.json"),
            contents: results.to_pretty_json(),
        })
    }
}
