use ferrous_doh_domain::DomainError;

/// Hash primitive used for history key derivation.
pub trait KeyDigest: Send + Sync {
    /// Lowercase hex SHA-256 of `data`.
    ///
    /// An error means the primitive is unavailable; derivation then falls
    /// back to a token-based key.
    fn sha256_hex(&self, data: &[u8]) -> Result<String, DomainError>;
}
