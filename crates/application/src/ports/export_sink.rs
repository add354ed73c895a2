use async_trait::async_trait;
use ferrous_doh_domain::{DomainError, ExportArtifact};

/// Destination for exported result files.
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Writes the artifact and returns where it landed.
    async fn save(&self, artifact: &ExportArtifact) -> Result<String, DomainError>;
}
