//! Configuration module for ferrous-doh
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `query`: Provider fan-out and history settings
//! - `providers`: DoH endpoints queried for every lookup
//! - `identity`: Public IP lookup and history key derivation
//! - `storage`: State and export directories
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod identity;
pub mod logging;
pub mod providers;
pub mod query;
pub mod root;
pub mod storage;

pub use errors::ConfigError;
pub use identity::IdentityConfig;
pub use logging::LoggingConfig;
pub use providers::ProviderConfig;
pub use query::QueryConfig;
pub use root::{CliOverrides, Config};
pub use storage::StorageConfig;
