//! Driving port for accepting uploads.

use async_trait::async_trait;

use crate::domain::{Error, Upload, UploadReceipt};

#[async_trait]
pub trait UploadIntake: Send + Sync {
    /// Store the upload and describe what was stored.
    async fn accept(&self, upload: Upload) -> Result<UploadReceipt, Error>;
}
