use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::errors::ConfigError;
use super::identity::IdentityConfig;
use super::logging::LoggingConfig;
use super::providers::{default_providers, ProviderConfig};
use super::query::QueryConfig;
use super::storage::StorageConfig;
use crate::provider::Provider;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,

    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values passed on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub state_dir: Option<String>,
    pub export_dir: Option<String>,
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            query: QueryConfig::default(),
            providers: default_providers(),
            identity: IdentityConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Loads the config file (defaults when `path` is `None`) and applies
    /// CLI overrides on top.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(dir) = overrides.state_dir {
            self.storage.state_dir = dir;
        }
        if let Some(dir) = overrides.export_dir {
            self.storage.export_dir = dir;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.providers.is_empty() {
            return Err(ConfigError::Validation(
                "At least one provider must be configured".into(),
            ));
        }

        let mut seen = HashSet::new();
        for p in &self.providers {
            if p.id.trim().is_empty() {
                return Err(ConfigError::Validation("Provider id cannot be empty".into()));
            }
            if !seen.insert(p.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate provider id: {}",
                    p.id
                )));
            }
            if !Provider::template_is_valid(&p.url) {
                return Err(ConfigError::Validation(format!(
                    "Provider {} URL must start with http:// or https:// and contain {{name}}",
                    p.id
                )));
            }
        }

        if self.query.history_limit == 0 {
            return Err(ConfigError::Validation(
                "query.history_limit must be greater than 0".into(),
            ));
        }
        if self.query.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query.timeout_ms must be greater than 0".into(),
            ));
        }
        if self.identity.ip_lookup_timeout_ms == 0 || self.identity.key_wait_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "identity timeouts must be greater than 0".into(),
            ));
        }
        if self.identity.ip_lookup_timeout_ms >= self.identity.key_wait_timeout_ms {
            return Err(ConfigError::Validation(format!(
                "identity.ip_lookup_timeout_ms ({}) must be less than identity.key_wait_timeout_ms ({})",
                self.identity.ip_lookup_timeout_ms, self.identity.key_wait_timeout_ms
            )));
        }

        Ok(())
    }

    pub fn provider_list(&self) -> Vec<Provider> {
        self.providers.iter().map(ProviderConfig::to_provider).collect()
    }
}
