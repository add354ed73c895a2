use async_trait::async_trait;
use ferrous_doh_application::ports::PublicIpLookup;
use ferrous_doh_domain::DomainError;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Deserialize)]
struct IpEcho {
    ip: String,
}

/// Public IP lookup against an ipify-style echo service returning
/// `{"ip": "..."}`.
pub struct IpifyLookup {
    client: reqwest::Client,
    url: String,
}

impl IpifyLookup {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::IpLookup(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl PublicIpLookup for IpifyLookup {
    async fn lookup(&self) -> Result<String, DomainError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DomainError::IpLookup(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::IpLookup(format!("HTTP {}", status.as_u16())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::IpLookup(e.to_string()))?;
        let echo: IpEcho =
            serde_json::from_slice(&body).map_err(|e| DomainError::IpLookup(e.to_string()))?;

        debug!(ip = %echo.ip, "Public IP resolved");
        Ok(echo.ip)
    }
}
