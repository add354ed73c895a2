//! ferrous-doh Application Layer
//!
//! Ports describe the outside world (DoH transport, IP echo service,
//! browser-style storage and cookies); use cases and the session container
//! hold the checker's behaviour.
pub mod ports;
pub mod services;
pub mod use_cases;
