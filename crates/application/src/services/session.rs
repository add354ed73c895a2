use ferrous_doh_domain::{
    DnsQuery, DomainError, HistoryEntry, HistoryKey, Provider, RecordType, ResultMap,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use super::history_store::HistoryStore;
use crate::use_cases::{
    ClearHistoryUseCase, DeriveHistoryKeyUseCase, DerivedKey, ExportResultsUseCase,
    RunQueryUseCase,
};

/// What happened to a submitted query.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank hostname; nothing was dispatched.
    Ignored,
    /// Every provider settled and the results were published.
    Published(ResultMap),
    /// A newer submission started before this batch settled; its results
    /// were dropped.
    Superseded { generation: u64 },
}

/// Display state of one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Idle,
    Loading,
    /// HTTP success; the payload may still hold zero answers.
    Success,
    Error(String),
}

#[derive(Default)]
struct SessionState {
    results: ResultMap,
    loading: BTreeSet<Arc<str>>,
    generation: u64,
    notes: String,
}

/// State container for one checker session.
///
/// Owns the result map, the set of providers still loading, the batch
/// generation counter and the user's history. Batches are tagged with a
/// generation when dispatched; a batch that settles after a newer one was
/// dispatched is discarded instead of overwriting the newer state.
pub struct CheckerSession {
    run_query: RunQueryUseCase,
    history: Arc<HistoryStore>,
    deriver: Arc<DeriveHistoryKeyUseCase>,
    clear_history: ClearHistoryUseCase,
    export: ExportResultsUseCase,
    state: RwLock<SessionState>,
    identity: RwLock<Option<DerivedKey>>,
}

impl CheckerSession {
    pub fn new(
        run_query: RunQueryUseCase,
        history: Arc<HistoryStore>,
        deriver: Arc<DeriveHistoryKeyUseCase>,
        export: ExportResultsUseCase,
    ) -> Self {
        let clear_history = ClearHistoryUseCase::new(Arc::clone(&history), Arc::clone(&deriver));
        Self {
            run_query,
            history,
            deriver,
            clear_history,
            export,
            state: RwLock::new(SessionState::default()),
            identity: RwLock::new(None),
        }
    }

    /// Derives the history key in the background. History operations issued
    /// meanwhile wait for it.
    pub fn start(self: &Arc<Self>) -> JoinHandle<DerivedKey> {
        let session = Arc::clone(self);
        tokio::spawn(async move { session.initialize().await })
    }

    /// Derives the history key and loads the history stored under it.
    ///
    /// If history was cleared while the derivation ran, its result belongs
    /// to the rotated-away token and is discarded.
    pub async fn initialize(&self) -> DerivedKey {
        let epoch = self.history.epoch();
        let derived = self.deriver.execute().await;

        let mut identity = self.identity.write().await;
        match self.history.activate_if_current(derived.key.clone(), epoch).await {
            Some(_) => *identity = Some(derived.clone()),
            None => debug!(key = %derived.key, "Derivation superseded by clear-history"),
        }
        derived
    }

    pub fn providers(&self) -> &[Provider] {
        self.run_query.providers()
    }

    #[instrument(skip(self))]
    pub async fn submit(&self, hostname: &str, record_type: RecordType) -> SubmitOutcome {
        let Some(query) = DnsQuery::parse(hostname, record_type) else {
            debug!("Blank hostname, nothing to query");
            return SubmitOutcome::Ignored;
        };

        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.results.clear();
            state.loading = self
                .providers()
                .iter()
                .map(|p| Arc::clone(&p.id))
                .collect();
            state.generation
        };

        let results = self.run_query.execute(&query).await;

        let published = {
            let mut state = self.state.write().await;
            if state.generation == generation {
                state.results = results.clone();
                state.loading.clear();
                true
            } else {
                false
            }
        };

        self.history.record(HistoryEntry::now(&query)).await;

        if published {
            info!(
                domain = %query.domain,
                record_type = %query.record_type,
                generation,
                "Results published"
            );
            SubmitOutcome::Published(results)
        } else {
            debug!(generation, "Batch superseded, results dropped");
            SubmitOutcome::Superseded { generation }
        }
    }

    pub async fn results(&self) -> ResultMap {
        self.state.read().await.results.clone()
    }

    pub async fn loading(&self) -> Vec<Arc<str>> {
        self.state.read().await.loading.iter().cloned().collect()
    }

    pub async fn status(&self, provider_id: &str) -> ProviderStatus {
        let state = self.state.read().await;
        if state.loading.contains(provider_id) {
            return ProviderStatus::Loading;
        }
        match state.results.get(provider_id) {
            Some(r) if r.ok => ProviderStatus::Success,
            Some(r) => ProviderStatus::Error(r.error().unwrap_or_default().to_string()),
            None => ProviderStatus::Idle,
        }
    }

    /// Empties the result map and loading set without touching history.
    /// Any batch still in flight is dropped when it settles.
    pub async fn clear_results(&self) {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.results.clear();
        state.loading.clear();
    }

    pub async fn export(&self) -> Result<String, DomainError> {
        let results = self.results().await;
        self.export.execute(&results).await
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.history.entries().await
    }

    pub async fn history_entry(&self, index: usize) -> Option<HistoryEntry> {
        self.history.get(index).await
    }

    pub async fn delete_history_entry(&self, index: usize) -> Result<HistoryEntry, DomainError> {
        self.history.delete(index).await
    }

    /// Clears history and rotates the user token.
    pub async fn clear_history(&self) -> DerivedKey {
        let known_ip = self.identity.read().await.as_ref().map(|d| d.ip.clone());
        let derived = self.clear_history.execute(known_ip.as_deref()).await;
        *self.identity.write().await = Some(derived.clone());
        derived
    }

    /// Current history key; `None` while derivation is pending.
    pub fn history_key(&self) -> Option<HistoryKey> {
        self.history.slot().current()
    }

    pub async fn identity(&self) -> Option<DerivedKey> {
        self.identity.read().await.clone()
    }

    pub async fn set_notes(&self, notes: impl Into<String>) {
        self.state.write().await.notes = notes.into();
    }

    pub async fn notes(&self) -> String {
        self.state.read().await.notes.clone()
    }
}
