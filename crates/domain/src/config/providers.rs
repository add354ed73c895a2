use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::provider::Provider;

/// A DoH endpoint as written in the config file
///
/// ```toml
/// [[providers]]
/// id = "cloudflare"
/// name = "Cloudflare (1.1.1.1)"
/// url = "https://cloudflare-dns.com/dns-query?name={name}&type={type}"
/// headers = { accept = "application/dns-json" }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub id: String,

    pub name: String,

    /// URL template with `{name}` and `{type}` placeholders
    pub url: String,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl ProviderConfig {
    pub fn to_provider(&self) -> Provider {
        self.headers.iter().fold(
            Provider::new(self.id.as_str(), self.name.as_str(), self.url.as_str()),
            |p, (k, v)| p.with_header(k.as_str(), v.as_str()),
        )
    }
}

pub fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            id: "google".to_string(),
            name: "Google (8.8.8.8)".to_string(),
            url: "https://dns.google/resolve?name={name}&type={type}".to_string(),
            headers: BTreeMap::new(),
        },
        ProviderConfig {
            id: "cloudflare".to_string(),
            name: "Cloudflare (1.1.1.1)".to_string(),
            url: "https://cloudflare-dns.com/dns-query?name={name}&type={type}".to_string(),
            headers: BTreeMap::from([(
                "accept".to_string(),
                "application/dns-json".to_string(),
            )]),
        },
    ]
}
