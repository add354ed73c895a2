use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid record type: {0}")]
    InvalidRecordType(String),

    #[error("Invalid provider: {0}")]
    InvalidProvider(String),

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("{0}")]
    Transport(String),

    #[error("Invalid DoH response: {0}")]
    InvalidResponse(String),

    #[error("Public IP lookup failed: {0}")]
    IpLookup(String),

    #[error("Digest unavailable: {0}")]
    DigestUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("No results to export")]
    NothingToExport,

    #[error("History entry not found: {0}")]
    HistoryEntryNotFound(usize),
}
