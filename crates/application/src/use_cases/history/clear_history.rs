use std::sync::Arc;
use tracing::{info, instrument};

use crate::services::HistoryStore;
use crate::use_cases::identity::{DeriveHistoryKeyUseCase, DerivedKey};

/// Erases the current user's history and rotates their token.
///
/// The key is re-derived from the new token right away, so entries written
/// afterwards land in a namespace that holders of the old cookie value can
/// no longer reach. Histories stored under other keys are left alone.
pub struct ClearHistoryUseCase {
    history: Arc<HistoryStore>,
    deriver: Arc<DeriveHistoryKeyUseCase>,
}

impl ClearHistoryUseCase {
    pub fn new(history: Arc<HistoryStore>, deriver: Arc<DeriveHistoryKeyUseCase>) -> Self {
        Self { history, deriver }
    }

    /// `known_ip` is the IP used by the previous derivation, if any; when
    /// absent the lookup is attempted again.
    #[instrument(skip(self))]
    pub async fn execute(&self, known_ip: Option<&str>) -> DerivedKey {
        let cleared = self.history.clear_current().await;

        let token = self.deriver.rotate_token().await;
        let ip = match known_ip {
            Some(ip) => ip.to_string(),
            None => self.deriver.lookup_ip().await,
        };
        let key = self.deriver.derive(&ip, &token);
        self.history.activate(key.clone()).await;

        info!(cleared = %cleared, key = %key, "History cleared for this user");

        DerivedKey { key, ip, token }
    }
}
