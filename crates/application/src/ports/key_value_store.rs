use async_trait::async_trait;
use ferrous_doh_domain::DomainError;

/// String key-value store that outlives the session (the equivalent of a
/// browser's local storage).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}
