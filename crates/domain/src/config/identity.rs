use serde::{Deserialize, Serialize};

/// Settings for deriving the per-user history key
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// IP echo service returning `{"ip": "..."}`
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,

    /// Timeout of the single public IP lookup attempt in milliseconds (default: 5000)
    #[serde(default = "default_ip_lookup_timeout_ms")]
    pub ip_lookup_timeout_ms: u64,

    /// How long history operations wait for key derivation before
    /// falling back to the default key, in milliseconds (default: 10000)
    #[serde(default = "default_key_wait_timeout_ms")]
    pub key_wait_timeout_ms: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            ip_lookup_url: default_ip_lookup_url(),
            ip_lookup_timeout_ms: default_ip_lookup_timeout_ms(),
            key_wait_timeout_ms: default_key_wait_timeout_ms(),
        }
    }
}

fn default_ip_lookup_url() -> String {
    "https://api.ipify.org?format=json".to_string()
}

fn default_ip_lookup_timeout_ms() -> u64 {
    5_000
}

fn default_key_wait_timeout_ms() -> u64 {
    10_000
}
