use ferrous_doh_domain::HistoryKey;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Holds the history key once derivation has produced it.
///
/// Starts out pending; readers can wait for it to be published.
#[derive(Clone)]
pub struct HistoryKeySlot {
    tx: Arc<watch::Sender<Option<HistoryKey>>>,
}

impl HistoryKeySlot {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn publish(&self, key: HistoryKey) {
        self.tx.send_replace(Some(key));
    }

    pub fn current(&self) -> Option<HistoryKey> {
        self.tx.borrow().clone()
    }

    /// Back to pending; waiters block until the next `publish`.
    pub fn reset(&self) {
        self.tx.send_replace(None);
    }

    /// Waits up to `timeout` for a key; `None` if none was published in time.
    pub async fn wait(&self, timeout: Duration) -> Option<HistoryKey> {
        let mut rx = self.tx.subscribe();
        let key = match tokio::time::timeout(timeout, rx.wait_for(Option::is_some)).await {
            Ok(Ok(key)) => (*key).clone(),
            _ => None,
        };
        key
    }
}

impl Default for HistoryKeySlot {
    fn default() -> Self {
        Self::new()
    }
}
