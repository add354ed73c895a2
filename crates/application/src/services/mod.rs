mod history_store;
mod key_slot;
mod session;

pub use history_store::HistoryStore;
pub use key_slot::HistoryKeySlot;
pub use session::{CheckerSession, ProviderStatus, SubmitOutcome};
