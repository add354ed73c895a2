mod run_query;

pub use run_query::RunQueryUseCase;
