//! Ports for storing uploaded files and previewing tabular ones.

use async_trait::async_trait;

use crate::domain::{TablePreview, UploadFileName};

use super::define_port_error;

define_port_error! {
    /// Failures raised by upload storage adapters.
    pub enum UploadStoreError {
        /// Writing the file failed.
        Io { message: String } => "upload storage failed: {message}",
    }
}

define_port_error! {
    /// Failures raised while previewing a table.
    pub enum TablePreviewError {
        /// The bytes are not a well-formed table.
        Malformed { message: String } => "could not parse table: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Write `bytes` to `directory/file_name`, replacing any previous file,
    /// and return the stored path relative to the upload root.
    async fn store(
        &self,
        directory: &str,
        file_name: &UploadFileName,
        bytes: Vec<u8>,
    ) -> Result<String, UploadStoreError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait TablePreviewer: Send + Sync {
    /// Header and up to `max_rows` records.
    fn preview(&self, bytes: &[u8], max_rows: usize) -> Result<TablePreview, TablePreviewError>;
}
