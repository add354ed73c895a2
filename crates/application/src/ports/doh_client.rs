use async_trait::async_trait;
use ferrous_doh_domain::{DnsQuery, DomainError, Provider};
use serde_json::Value;

/// Sends one JSON DoH request to one provider.
#[async_trait]
pub trait DohClient: Send + Sync {
    /// Returns the parsed response body on HTTP success.
    ///
    /// # Errors
    ///
    /// * `DomainError::HttpStatus` - The provider answered with a non-success status
    /// * `DomainError::Transport` - The request could not be completed
    /// * `DomainError::InvalidResponse` - The body was not JSON
    async fn fetch(&self, provider: &Provider, query: &DnsQuery) -> Result<Value, DomainError>;
}
