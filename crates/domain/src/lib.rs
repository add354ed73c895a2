//! ferrous-doh Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod doh_response;
pub mod errors;
pub mod export;
pub mod history;
pub mod history_key;
pub mod provider;
pub mod query_result;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use dns_record::RecordType;
pub use doh_response::AnswerRow;
pub use errors::DomainError;
pub use export::ExportArtifact;
pub use history::{History, HistoryEntry, HISTORY_LIMIT};
pub use history_key::{HistoryKey, UserToken};
pub use provider::Provider;
pub use query_result::{QueryOutcome, QueryResult, ResultMap};
