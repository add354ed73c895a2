use ferrous_doh_application::ports::KeyDigest;
use ferrous_doh_domain::DomainError;
use sha2::{Digest, Sha256};
use std::fmt::Write;

pub struct Sha256Digest;

impl KeyDigest for Sha256Digest {
    fn sha256_hex(&self, data: &[u8]) -> Result<String, DomainError> {
        let hash = Sha256::digest(data);
        let mut hex = String::with_capacity(hash.len() * 2);
        for byte in hash.iter() {
            write!(hex, "{byte:02x}").map_err(|e| DomainError::DigestUnavailable(e.to_string()))?;
        }
        Ok(hex)
    }
}
