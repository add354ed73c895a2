pub mod doh_client;

pub use doh_client::ReqwestDohClient;
