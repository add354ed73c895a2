//! ferrous-doh Infrastructure Layer
pub mod dns;
pub mod identity;
pub mod storage;
