use async_trait::async_trait;
use ferrous_doh_domain::DomainError;

/// Persistent cookies scoped to the checker.
#[async_trait]
pub trait CookieJar: Send + Sync {
    /// Current value of a cookie; `None` when absent or expired.
    async fn get(&self, name: &str) -> Result<Option<String>, DomainError>;

    /// Stores a cookie with `path=/` and the given max-age.
    async fn set(&self, name: &str, value: &str, max_age_secs: i64) -> Result<(), DomainError>;
}
