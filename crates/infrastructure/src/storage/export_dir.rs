use async_trait::async_trait;
use ferrous_doh_application::ports::ExportSink;
use ferrous_doh_domain::{DomainError, ExportArtifact};
use std::path::PathBuf;
use tracing::info;

/// Writes exported result files into a directory.
pub struct DirectoryExportSink {
    dir: PathBuf,
}

impl DirectoryExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ExportSink for DirectoryExportSink {
    async fn save(&self, artifact: &ExportArtifact) -> Result<String, DomainError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::IoError(format!("{}: {e}", self.dir.display())))?;

        let path = self.dir.join(&artifact.file_name);
        tokio::fs::write(&path, &artifact.contents)
            .await
            .map_err(|e| DomainError::IoError(format!("{}: {e}", path.display())))?;

        info!(path = %path.display(), bytes = artifact.contents.len(), "Results exported");
        Ok(path.display().to_string())
    }
}
