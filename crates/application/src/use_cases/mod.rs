pub mod export;
pub mod history;
pub mod identity;
pub mod preferences;
pub mod queries;

// Re-export use cases
pub use export::ExportResultsUseCase;
pub use history::ClearHistoryUseCase;
pub use identity::{DeriveHistoryKeyUseCase, DerivedKey};
pub use preferences::ThemePreferenceUseCase;
pub use queries::RunQueryUseCase;
