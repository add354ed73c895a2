use chrono::Utc;
use ferrous_doh_domain::{DomainError, ExportArtifact, ResultMap};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::ExportSink;

pub struct ExportResultsUseCase {
    sink: Arc<dyn ExportSink>,
}

impl ExportResultsUseCase {
    pub fn new(sink: Arc<dyn ExportSink>) -> Self {
        Self { sink }
    }

    /// Saves the result map as `dns-results-<unix-ms>.json`.
    ///
    /// # Errors
    ///
    /// * `DomainError::NothingToExport` - No query has produced results yet
    #[instrument(skip(self, results), fields(providers = results.len()))]
    pub async fn execute(&self, results: &ResultMap) -> Result<String, DomainError> {
        let artifact = ExportArtifact::from_results(results, Utc::now().timestamp_millis())?;
        let location = self.sink.save(&artifact).await?;

        info!(location = %location, "Results exported");

        Ok(location)
    }
}
