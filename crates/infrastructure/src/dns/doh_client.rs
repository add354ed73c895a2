use async_trait::async_trait;
use ferrous_doh_application::ports::DohClient;
use ferrous_doh_domain::{DnsQuery, DomainError, Provider};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON DNS-over-HTTPS client (`application/dns-json` flavour).
///
/// One pooled client is shared by every provider. The provider's URL
/// template and headers decide the request; the body is returned as-is.
pub struct ReqwestDohClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestDohClient {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| DomainError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    pub fn with_default_timeout() -> Result<Self, DomainError> {
        Self::new(DEFAULT_TIMEOUT)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl DohClient for ReqwestDohClient {
    async fn fetch(&self, provider: &Provider, query: &DnsQuery) -> Result<Value, DomainError> {
        let url = provider.build_url(query);
        debug!(provider = %provider.id, url = %url, "Sending DoH query");

        let request = provider
            .request_headers()
            .into_iter()
            .fold(self.client.get(&url), |req, (name, value)| {
                req.header(name, value)
            });

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Transport(transport_message(&e)))?;

        let status = response.status();
        if !status.is_success() {
            debug!(
                provider = %provider.id,
                status = status.as_u16(),
                "DoH provider returned error status"
            );
            return Err(DomainError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::Transport(transport_message(&e)))?;

        debug!(
            provider = %provider.id,
            response_len = body.len(),
            "DoH response received"
        );

        serde_json::from_slice(&body).map_err(|e| DomainError::InvalidResponse(e.to_string()))
    }
}

fn transport_message(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timed out".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {e}")
    } else {
        e.to_string()
    }
}
