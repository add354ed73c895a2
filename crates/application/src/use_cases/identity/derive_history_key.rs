use ferrous_doh_domain::history_key::{
    derivation_input, USER_TOKEN_COOKIE, USER_TOKEN_MAX_AGE_SECS,
};
use ferrous_doh_domain::{HistoryKey, UserToken};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::ports::{CookieJar, KeyDigest, PublicIpLookup};

const DEFAULT_IP_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of one key derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedKey {
    pub key: HistoryKey,
    /// Public IP used as input; empty when the lookup failed.
    pub ip: String,
    pub token: UserToken,
}

/// Derives the storage namespace for one user's history from their public
/// IP and a cookie token.
///
/// Nothing here fails: a missing IP, cookie errors and an unavailable digest
/// all degrade to a less specific key.
pub struct DeriveHistoryKeyUseCase {
    cookies: Arc<dyn CookieJar>,
    ip_lookup: Arc<dyn PublicIpLookup>,
    digest: Arc<dyn KeyDigest>,
    ip_lookup_timeout: Duration,
}

impl DeriveHistoryKeyUseCase {
    pub fn new(
        cookies: Arc<dyn CookieJar>,
        ip_lookup: Arc<dyn PublicIpLookup>,
        digest: Arc<dyn KeyDigest>,
    ) -> Self {
        Self {
            cookies,
            ip_lookup,
            digest,
            ip_lookup_timeout: DEFAULT_IP_LOOKUP_TIMEOUT,
        }
    }

    pub fn with_ip_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.ip_lookup_timeout = timeout;
        self
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> DerivedKey {
        let token = self.ensure_token().await;
        let ip = self.lookup_ip().await;
        let key = self.derive(&ip, &token);

        info!(
            key = %key,
            ip_known = !ip.is_empty(),
            "History key derived"
        );

        DerivedKey { key, ip, token }
    }

    /// Reads the token cookie, issuing a fresh one when it is missing.
    pub async fn ensure_token(&self) -> UserToken {
        match self.cookies.get(USER_TOKEN_COOKIE).await {
            Ok(Some(value)) if !value.is_empty() => UserToken::new(value),
            Ok(_) => {
                debug!("No user token cookie, issuing a new one");
                self.issue_token().await
            }
            Err(e) => {
                warn!(error = %e, "Failed to read user token cookie");
                self.issue_token().await
            }
        }
    }

    /// Replaces the token cookie with a brand-new value.
    pub async fn rotate_token(&self) -> UserToken {
        let token = self.issue_token().await;
        info!("User token rotated");
        token
    }

    /// Single bounded attempt; any failure yields an empty string.
    pub async fn lookup_ip(&self) -> String {
        match tokio::time::timeout(self.ip_lookup_timeout, self.ip_lookup.lookup()).await {
            Ok(Ok(ip)) => ip,
            Ok(Err(e)) => {
                debug!(error = %e, "Public IP lookup failed, using token only");
                String::new()
            }
            Err(_) => {
                debug!(
                    timeout_ms = self.ip_lookup_timeout.as_millis() as u64,
                    "Public IP lookup timed out, using token only"
                );
                String::new()
            }
        }
    }

    /// `dns_history_` + first 16 hex chars of SHA-256(`ip|token`), or
    /// `dns_history_<token>` when no digest is available.
    pub fn derive(&self, ip: &str, token: &UserToken) -> HistoryKey {
        let input = derivation_input(ip, token);
        match self.digest.sha256_hex(input.as_bytes()) {
            Ok(hex) => HistoryKey::from_digest_hex(&hex),
            Err(e) => {
                warn!(error = %e, "Digest unavailable, falling back to token key");
                HistoryKey::from_token(token)
            }
        }
    }

    async fn issue_token(&self) -> UserToken {
        let token = UserToken::generate();
        if let Err(e) = self
            .cookies
            .set(USER_TOKEN_COOKIE, token.as_str(), USER_TOKEN_MAX_AGE_SECS)
            .await
        {
            warn!(error = %e, "Failed to persist user token cookie");
        }
        token
    }
}
