use ferrous_doh_application::services::{CheckerSession, HistoryStore};
use ferrous_doh_application::use_cases::{
    DeriveHistoryKeyUseCase, ExportResultsUseCase, RunQueryUseCase, ThemePreferenceUseCase,
};
use ferrous_doh_domain::Config;
use std::sync::Arc;
use std::time::Duration;

use super::Adapters;

/// Everything the commands need, wired from one config.
pub struct AppContext {
    pub session: Arc<CheckerSession>,
    pub theme: ThemePreferenceUseCase,
}

impl AppContext {
    pub async fn build(config: &Config) -> anyhow::Result<Self> {
        let adapters = Adapters::build(config).await?;
        Ok(Self::from_adapters(config, adapters))
    }

    pub fn from_adapters(config: &Config, adapters: Adapters) -> Self {
        let history = Arc::new(
            HistoryStore::new(Arc::clone(&adapters.store))
                .with_limit(config.query.history_limit)
                .with_key_wait(Duration::from_millis(config.identity.key_wait_timeout_ms)),
        );

        let deriver = Arc::new(
            DeriveHistoryKeyUseCase::new(
                Arc::clone(&adapters.cookies),
                Arc::clone(&adapters.ip_lookup),
                Arc::clone(&adapters.digest),
            )
            .with_ip_lookup_timeout(Duration::from_millis(config.identity.ip_lookup_timeout_ms)),
        );

        let session = Arc::new(CheckerSession::new(
            RunQueryUseCase::new(Arc::clone(&adapters.doh_client), config.provider_list()),
            history,
            deriver,
            ExportResultsUseCase::new(Arc::clone(&adapters.export_sink)),
        ));

        Self {
            session,
            theme: ThemePreferenceUseCase::new(adapters.store),
        }
    }
}
