mod clear_history;

pub use clear_history::ClearHistoryUseCase;
