pub mod digest;
pub mod public_ip;

pub use digest::Sha256Digest;
pub use public_ip::IpifyLookup;
