use ferrous_doh_application::ports::{
    CookieJar, DohClient, ExportSink, KeyDigest, KeyValueStore, PublicIpLookup,
};
use ferrous_doh_domain::Config;
use ferrous_doh_infrastructure::dns::ReqwestDohClient;
use ferrous_doh_infrastructure::identity::{IpifyLookup, Sha256Digest};
use ferrous_doh_infrastructure::storage::{DirectoryExportSink, FileCookieJar, JsonFileStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Concrete implementations of every application port.
pub struct Adapters {
    pub doh_client: Arc<dyn DohClient>,
    pub ip_lookup: Arc<dyn PublicIpLookup>,
    pub digest: Arc<dyn KeyDigest>,
    pub store: Arc<dyn KeyValueStore>,
    pub cookies: Arc<dyn CookieJar>,
    pub export_sink: Arc<dyn ExportSink>,
}

impl Adapters {
    pub async fn build(config: &Config) -> anyhow::Result<Self> {
        let doh_client = ReqwestDohClient::new(Duration::from_millis(config.query.timeout_ms))?;
        let ip_lookup = IpifyLookup::new(
            config.identity.ip_lookup_url.as_str(),
            Duration::from_millis(config.identity.ip_lookup_timeout_ms),
        )?;
        let store = JsonFileStore::open(config.storage.state_file()).await?;
        let cookies = FileCookieJar::new(config.storage.cookie_file());

        debug!(
            state_file = %store.path().display(),
            cookie_file = %cookies.path().display(),
            "Storage adapters ready"
        );

        Ok(Self {
            doh_client: Arc::new(doh_client),
            ip_lookup: Arc::new(ip_lookup),
            digest: Arc::new(Sha256Digest),
            store: Arc::new(store),
            cookies: Arc::new(cookies),
            export_sink: Arc::new(DirectoryExportSink::new(config.storage.export_dir.as_str())),
        })
    }
}
