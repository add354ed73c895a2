#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_doh_application::ports::{
    CookieJar, DohClient, ExportSink, KeyDigest, KeyValueStore, PublicIpLookup,
};
use ferrous_doh_application::services::{CheckerSession, HistoryStore};
use ferrous_doh_application::use_cases::{
    DeriveHistoryKeyUseCase, ExportResultsUseCase, RunQueryUseCase,
};
use ferrous_doh_domain::{DnsQuery, DomainError, ExportArtifact, Provider};
use serde_json::{json, Value};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

// ============================================================================
// Mock DohClient
// ============================================================================

#[derive(Clone)]
pub struct MockReply {
    pub delay_ms: u64,
    pub result: Result<Value, DomainError>,
}

impl MockReply {
    pub fn ok(delay_ms: u64, json: Value) -> Self {
        Self {
            delay_ms,
            result: Ok(json),
        }
    }

    pub fn status(delay_ms: u64, code: u16) -> Self {
        Self {
            delay_ms,
            result: Err(DomainError::HttpStatus(code)),
        }
    }

    pub fn transport(delay_ms: u64, message: &str) -> Self {
        Self {
            delay_ms,
            result: Err(DomainError::Transport(message.to_string())),
        }
    }
}

/// Replies are looked up by `provider/domain` first, then by provider id.
#[derive(Clone, Default)]
pub struct MockDohClient {
    replies: Arc<RwLock<HashMap<String, MockReply>>>,
    calls: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockDohClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_reply(&self, provider_id: &str, reply: MockReply) {
        self.replies
            .write()
            .await
            .insert(provider_id.to_string(), reply);
    }

    pub async fn set_reply_for(&self, provider_id: &str, domain: &str, reply: MockReply) {
        self.replies
            .write()
            .await
            .insert(format!("{provider_id}/{domain}"), reply);
    }

    pub async fn calls(&self) -> Vec<(String, String)> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl DohClient for MockDohClient {
    async fn fetch(&self, provider: &Provider, query: &DnsQuery) -> Result<Value, DomainError> {
        self.calls
            .write()
            .await
            .push((provider.id.to_string(), query.domain.to_string()));

        let reply = {
            let replies = self.replies.read().await;
            replies
                .get(&format!("{}/{}", provider.id, query.domain))
                .or_else(|| replies.get(provider.id.as_ref()))
                .cloned()
        };

        let reply = reply.unwrap_or_else(|| MockReply::ok(0, json!({"Status": 0})));
        if reply.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(reply.delay_ms)).await;
        }
        reply.result
    }
}

pub fn example_answer() -> Value {
    json!({
        "Status": 0,
        "Answer": [
            {"name": "example.com", "type": "A", "TTL": 300, "data": "93.184.216.34"}
        ]
    })
}

// ============================================================================
// Mock PublicIpLookup
// ============================================================================

#[derive(Clone)]
pub struct MockPublicIp {
    ip: Arc<RwLock<Result<String, DomainError>>>,
    delay_ms: u64,
    calls: Arc<AtomicUsize>,
}

impl MockPublicIp {
    pub fn returning(ip: &str) -> Self {
        Self {
            ip: Arc::new(RwLock::new(Ok(ip.to_string()))),
            delay_ms: 0,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            ip: Arc::new(RwLock::new(Err(DomainError::IpLookup("HTTP 503".into())))),
            delay_ms: 0,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub async fn set_ip(&self, ip: &str) {
        *self.ip.write().await = Ok(ip.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PublicIpLookup for MockPublicIp {
    async fn lookup(&self) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        self.ip.read().await.clone()
    }
}

// ============================================================================
// In-memory KeyValueStore
// ============================================================================

#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<String, String>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }

    pub async fn put_raw(&self, key: &str, value: &str) {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    async fn check(&self) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::Storage("quota exceeded".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check().await?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.check().await?;
        self.put_raw(key, value).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.check().await?;
        self.values.write().await.remove(key);
        Ok(())
    }
}

// ============================================================================
// In-memory CookieJar
// ============================================================================

#[derive(Clone, Default)]
pub struct MemoryCookieJar {
    cookies: Arc<RwLock<HashMap<String, (String, i64)>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_cookie(name: &str, value: &str) -> Self {
        let jar = Self::new();
        jar.cookies
            .write()
            .await
            .insert(name.to_string(), (value.to_string(), 31_536_000));
        jar
    }

    pub async fn cookie(&self, name: &str) -> Option<(String, i64)> {
        self.cookies.read().await.get(name).cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CookieJar for MemoryCookieJar {
    async fn get(&self, name: &str) -> Result<Option<String>, DomainError> {
        Ok(self.cookies.read().await.get(name).map(|(v, _)| v.clone()))
    }

    async fn set(&self, name: &str, value: &str, max_age_secs: i64) -> Result<(), DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.cookies
            .write()
            .await
            .insert(name.to_string(), (value.to_string(), max_age_secs));
        Ok(())
    }
}

// ============================================================================
// Digests
// ============================================================================

/// Deterministic stand-in for SHA-256: 64 hex chars built from four salted
/// std hashes of the input.
pub struct FakeDigest;

impl KeyDigest for FakeDigest {
    fn sha256_hex(&self, data: &[u8]) -> Result<String, DomainError> {
        Ok((0u8..4)
            .map(|salt| {
                let mut hasher = DefaultHasher::new();
                salt.hash(&mut hasher);
                data.hash(&mut hasher);
                format!("{:016x}", hasher.finish())
            })
            .collect())
    }
}

pub struct UnavailableDigest;

impl KeyDigest for UnavailableDigest {
    fn sha256_hex(&self, _data: &[u8]) -> Result<String, DomainError> {
        Err(DomainError::DigestUnavailable("no SHA-256 in this runtime".into()))
    }
}

// ============================================================================
// In-memory ExportSink
// ============================================================================

#[derive(Clone, Default)]
pub struct MemoryExportSink {
    saved: Arc<RwLock<Vec<ExportArtifact>>>,
}

impl MemoryExportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn saved(&self) -> Vec<ExportArtifact> {
        self.saved.read().await.clone()
    }
}

#[async_trait]
impl ExportSink for MemoryExportSink {
    async fn save(&self, artifact: &ExportArtifact) -> Result<String, DomainError> {
        self.saved.write().await.push(artifact.clone());
        Ok(format!("memory://{}", artifact.file_name))
    }
}

// ============================================================================
// Session fixture
// ============================================================================

pub struct Fixture {
    pub client: MockDohClient,
    pub ip: MockPublicIp,
    pub store: MemoryStore,
    pub cookies: MemoryCookieJar,
    pub sink: MemoryExportSink,
    pub history: Arc<HistoryStore>,
    pub deriver: Arc<DeriveHistoryKeyUseCase>,
    pub session: Arc<CheckerSession>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_parts(MockPublicIp::returning("203.0.113.9"), MemoryCookieJar::new())
    }

    pub fn with_parts(ip: MockPublicIp, cookies: MemoryCookieJar) -> Self {
        Self::with_timeouts(ip, cookies, Duration::from_secs(5), Duration::from_secs(10))
    }

    pub fn with_timeouts(
        ip: MockPublicIp,
        cookies: MemoryCookieJar,
        ip_lookup_timeout: Duration,
        key_wait: Duration,
    ) -> Self {
        let client = MockDohClient::new();
        let store = MemoryStore::new();
        let sink = MemoryExportSink::new();

        let history =
            Arc::new(HistoryStore::new(Arc::new(store.clone())).with_key_wait(key_wait));
        let deriver = Arc::new(
            DeriveHistoryKeyUseCase::new(
                Arc::new(cookies.clone()),
                Arc::new(ip.clone()),
                Arc::new(FakeDigest),
            )
            .with_ip_lookup_timeout(ip_lookup_timeout),
        );
        let session = Arc::new(CheckerSession::new(
            RunQueryUseCase::new(Arc::new(client.clone()), Provider::defaults()),
            Arc::clone(&history),
            Arc::clone(&deriver),
            ExportResultsUseCase::new(Arc::new(sink.clone())),
        ));

        Self {
            client,
            ip,
            store,
            cookies,
            sink,
            history,
            deriver,
            session,
        }
    }

    /// Fixture whose key derivation has already completed.
    pub async fn initialized() -> Self {
        let fixture = Self::new();
        fixture.session.initialize().await;
        fixture
    }
}
