//! Upload intake: store the bytes, then describe what was stored.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{TablePreviewer, UploadIntake, UploadStore};
use crate::domain::{Error, PREVIEW_ROWS, Upload, UploadKind, UploadReceipt, size_in_megabytes};

/// Implements [`UploadIntake`] over an [`UploadStore`] and a CSV previewer.
#[derive(Clone)]
pub struct UploadService<S, P> {
    store: Arc<S>,
    previewer: Arc<P>,
}

impl<S, P> UploadService<S, P> {
    pub fn new(store: Arc<S>, previewer: Arc<P>) -> Self {
        Self { store, previewer }
    }
}

#[async_trait]
impl<S, P> UploadIntake for UploadService<S, P>
where
    S: UploadStore,
    P: TablePreviewer,
{
    async fn accept(&self, upload: Upload) -> Result<UploadReceipt, Error> {
        let Upload {
            file_name,
            content_type,
            kind,
            bytes,
        } = upload;
        let size_mb = size_in_megabytes(bytes.len());
        let preview = (kind == UploadKind::Csv)
            .then(|| self.previewer.preview(&bytes, PREVIEW_ROWS));

        let file_path = self
            .store
            .store(kind.directory(), &file_name, bytes)
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        tracing::info!(file_path = %file_path, size_mb, "upload stored");

        let file_name = file_name.as_str().to_owned();
        match (kind, preview) {
            (_, Some(Ok(preview))) => Ok(UploadReceipt::Table {
                file_name,
                content_type,
                file_path,
                preview,
            }),
            (_, Some(Err(err))) => {
                tracing::warn!(file_path = %file_path, error = %err, "stored CSV is unreadable");
                Err(Error::invalid_request("Could not parse CSV"))
            }
            (UploadKind::Pdf, None) => Ok(UploadReceipt::Document {
                file_name,
                content_type,
                file_path,
                size_mb,
            }),
            (_, None) => Ok(UploadReceipt::Stored {
                file_name,
                content_type,
                file_path,
            }),
        }
    }
}
