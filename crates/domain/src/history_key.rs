use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Storage key used before a per-user key has been derived.
pub const DEFAULT_HISTORY_KEY: &str = "dns_history";

/// Prefix of every derived history key.
pub const HISTORY_KEY_PREFIX: &str = "dns_history_";

/// Cookie holding the per-user token.
pub const USER_TOKEN_COOKIE: &str = "dns_user_token";

/// One year, in seconds.
pub const USER_TOKEN_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 365;

/// Number of digest hex characters kept in a derived key.
pub const KEY_DIGEST_HEX_LEN: usize = 16;

const TOKEN_LEN: usize = 10;
const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Namespace under which one user's history list is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryKey(Arc<str>);

impl HistoryKey {
    pub fn default_key() -> Self {
        Self(Arc::from(DEFAULT_HISTORY_KEY))
    }

    /// Key from a hex digest; only the first 16 characters are kept.
    pub fn from_digest_hex(hex: &str) -> Self {
        let suffix: String = hex.chars().take(KEY_DIGEST_HEX_LEN).collect();
        Self(Arc::from(format!("{HISTORY_KEY_PREFIX}{suffix}")))
    }

    /// Weaker key used when no digest could be computed.
    pub fn from_token(token: &UserToken) -> Self {
        Self(Arc::from(format!("{HISTORY_KEY_PREFIX}{}", token.as_str())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.as_str() == DEFAULT_HISTORY_KEY
    }
}

impl Default for HistoryKey {
    fn default() -> Self {
        Self::default_key()
    }
}

impl fmt::Display for HistoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Random per-user token, rotated when history is cleared.
///
/// Generated with a non-cryptographic RNG: it only has to keep users of a
/// shared machine from trivially guessing each other's namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserToken(Arc<str>);

impl UserToken {
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    pub fn generate() -> Self {
        Self::generate_with(&mut fastrand::Rng::new())
    }

    pub fn generate_with(rng: &mut fastrand::Rng) -> Self {
        let token: String = (0..TOKEN_LEN)
            .map(|_| TOKEN_ALPHABET[rng.usize(..TOKEN_ALPHABET.len())] as char)
            .collect();
        Self(Arc::from(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Digest input for a (public IP, token) pair. The IP may be empty when the
/// lookup failed.
pub fn derivation_input(ip: &str, token: &UserToken) -> String {
    format!("{ip}|{}", token.as_str())
}
