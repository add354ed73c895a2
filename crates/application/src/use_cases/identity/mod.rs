mod derive_history_key;

pub use derive_history_key::{DeriveHistoryKeyUseCase, DerivedKey};
