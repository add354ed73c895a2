use ferrous_doh_domain::{DomainError, History, HistoryEntry, HistoryKey, HISTORY_LIMIT};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, RwLockWriteGuard};
use tracing::{debug, info, warn};

use super::key_slot::HistoryKeySlot;
use crate::ports::KeyValueStore;

const DEFAULT_KEY_WAIT: Duration = Duration::from_secs(10);

/// In-memory history list mirrored to a key-value store under the
/// per-user history key.
///
/// Every operation waits for the key to be derived first, so nothing is
/// written under a key the user will never read back. If derivation does
/// not finish within the wait limit the default key is used instead.
/// Storage failures are logged and otherwise ignored.
///
/// Each clear bumps the rotation epoch. A derivation started before a clear
/// can no longer activate its key, and operations issued while the clear is
/// in progress wait for the rotated key.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    slot: HistoryKeySlot,
    entries: RwLock<History>,
    epoch: AtomicU64,
    limit: usize,
    key_wait: Duration,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            slot: HistoryKeySlot::new(),
            entries: RwLock::new(History::with_limit(HISTORY_LIMIT)),
            epoch: AtomicU64::new(0),
            limit: HISTORY_LIMIT,
            key_wait: DEFAULT_KEY_WAIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self.entries = RwLock::new(History::with_limit(limit));
        self
    }

    pub fn with_key_wait(mut self, key_wait: Duration) -> Self {
        self.key_wait = key_wait;
        self
    }

    pub fn slot(&self) -> &HistoryKeySlot {
        &self.slot
    }

    /// Number of clears so far.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Switches to `key` and replaces the in-memory list with what is
    /// persisted under it. Returns the number of entries loaded.
    pub async fn activate(&self, key: HistoryKey) -> usize {
        let mut entries = self.entries.write().await;
        self.load_into(&mut entries, key).await
    }

    /// Like `activate`, but only while no clear happened since `epoch` was
    /// read. Returns `None` when the key was discarded.
    pub async fn activate_if_current(&self, key: HistoryKey, epoch: u64) -> Option<usize> {
        let mut entries = self.entries.write().await;
        if self.epoch() != epoch {
            debug!(key = %key, epoch, "History cleared meanwhile, discarding derived key");
            return None;
        }
        Some(self.load_into(&mut entries, key).await)
    }

    async fn load_into(&self, entries: &mut History, key: HistoryKey) -> usize {
        *entries = self.load(&key).await;
        self.slot.publish(key.clone());

        info!(key = %key, entries = entries.len(), "History activated");
        entries.len()
    }

    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.current_key().await;
        self.entries.read().await.to_vec()
    }

    pub async fn get(&self, index: usize) -> Option<HistoryEntry> {
        self.current_key().await;
        self.entries.read().await.get(index).cloned()
    }

    pub async fn record(&self, entry: HistoryEntry) {
        let (key, mut entries) = self.lock_current().await;
        entries.push(entry);
        self.persist(&key, &entries).await;
    }

    pub async fn delete(&self, index: usize) -> Result<HistoryEntry, DomainError> {
        let (key, mut entries) = self.lock_current().await;
        let removed = entries
            .remove(index)
            .ok_or(DomainError::HistoryEntryNotFound(index))?;
        self.persist(&key, &entries).await;
        Ok(removed)
    }

    /// Empties the list and removes its persisted copy, then leaves the key
    /// pending until the caller activates a new one. Returns the key that
    /// was cleared.
    pub async fn clear_current(&self) -> HistoryKey {
        let (key, mut entries) = self.lock_current().await;
        entries.clear();
        if let Err(e) = self.store.remove(key.as_str()).await {
            warn!(key = %key, error = %e, "Failed to remove persisted history");
        }
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.slot.reset();
        key
    }

    /// Write access to the list together with the key it belongs to. The
    /// key is re-checked under the lock so a concurrent clear cannot slip in
    /// between.
    async fn lock_current(&self) -> (HistoryKey, RwLockWriteGuard<'_, History>) {
        loop {
            let key = self.current_key().await;
            let entries = self.entries.write().await;
            if self.slot.current().as_ref() == Some(&key) {
                return (key, entries);
            }
        }
    }

    async fn current_key(&self) -> HistoryKey {
        if let Some(key) = self.slot.current() {
            return key;
        }
        if let Some(key) = self.slot.wait(self.key_wait).await {
            return key;
        }

        let mut entries = self.entries.write().await;
        if let Some(key) = self.slot.current() {
            return key;
        }
        warn!(
            wait_ms = self.key_wait.as_millis() as u64,
            "History key not derived in time, using default key"
        );
        let key = HistoryKey::default_key();
        self.load_into(&mut entries, key.clone()).await;
        key
    }

    async fn load(&self, key: &HistoryKey) -> History {
        match self.store.get(key.as_str()).await {
            Ok(Some(raw)) => History::from_json(&raw, self.limit).unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "Discarding unreadable history");
                History::with_limit(self.limit)
            }),
            Ok(None) => {
                debug!(key = %key, "No persisted history");
                History::with_limit(self.limit)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read persisted history");
                History::with_limit(self.limit)
            }
        }
    }

    async fn persist(&self, key: &HistoryKey, history: &History) {
        if let Err(e) = self.store.set(key.as_str(), &history.to_json()).await {
            warn!(key = %key, error = %e, "Failed to persist history");
        }
    }
}
