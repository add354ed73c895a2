mod cookie_jar;
mod doh_client;
mod export_sink;
mod key_digest;
mod key_value_store;
mod public_ip;

pub use cookie_jar::CookieJar;
pub use doh_client::DohClient;
pub use export_sink::ExportSink;
pub use key_digest::KeyDigest;
pub use key_value_store::KeyValueStore;
pub use public_ip::PublicIpLookup;
