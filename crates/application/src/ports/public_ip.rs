use async_trait::async_trait;
use ferrous_doh_domain::DomainError;

/// Best-effort lookup of the caller's public IP address.
#[async_trait]
pub trait PublicIpLookup: Send + Sync {
    /// One attempt, no retry. Callers treat any error as "IP unknown".
    async fn lookup(&self) -> Result<String, DomainError>;
}
