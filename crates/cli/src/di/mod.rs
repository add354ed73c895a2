pub mod adapters;
pub mod session;

pub use adapters::Adapters;
pub use session::AppContext;
