use std::sync::Arc;
use tracing::warn;

use crate::ports::KeyValueStore;

/// Persisted key for the dark-mode flag.
pub const DARK_MODE_KEY: &str = "dns_dark";

/// Dark/light display preference, stored as `"1"` / `"0"`.
pub struct ThemePreferenceUseCase {
    store: Arc<dyn KeyValueStore>,
}

impl ThemePreferenceUseCase {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn is_dark(&self) -> bool {
        match self.store.get(DARK_MODE_KEY).await {
            Ok(value) => value.as_deref() == Some("1"),
            Err(e) => {
                warn!(error = %e, "Failed to read theme preference");
                false
            }
        }
    }

    pub async fn set_dark(&self, dark: bool) {
        let value = if dark { "1" } else { "0" };
        if let Err(e) = self.store.set(DARK_MODE_KEY, value).await {
            warn!(error = %e, "Failed to persist theme preference");
        }
    }

    /// Flips the preference and returns the new value.
    pub async fn toggle(&self) -> bool {
        let dark = !self.is_dark().await;
        self.set_dark(dark).await;
        dark
    }
}
