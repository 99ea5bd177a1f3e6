//! File-system adapters for uploads.

mod cap_std_upload_store;
mod csv_preview;

pub use cap_std_upload_store::CapStdUploadStore;
pub use csv_preview::CsvTablePreviewer;
