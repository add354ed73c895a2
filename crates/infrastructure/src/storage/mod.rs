pub mod cookie_file;
pub mod export_dir;
pub mod kv_file;

pub use cookie_file::FileCookieJar;
pub use export_dir::DirectoryExportSink;
pub use kv_file::JsonFileStore;
