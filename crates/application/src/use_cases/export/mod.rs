mod export_results;

pub use export_results::ExportResultsUseCase;
