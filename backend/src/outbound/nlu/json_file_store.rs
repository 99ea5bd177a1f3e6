//! `NluExampleStore` over a JSON file on disk.

use std::sync::Arc;

use async_trait::async_trait;
use camino::Utf8Path;
use nlu_data::{DocumentError, DocumentFile, NluDocument};

use crate::domain::ports::{NluExampleStore, NluStoreError};

/// Loads and atomically rewrites one JSON document through [`DocumentFile`].
///
/// Blocking file I/O runs on tokio's blocking pool.
#[derive(Clone)]
pub struct JsonFileNluStore {
    file: Arc<DocumentFile>,
}

impl JsonFileNluStore {
    /// Open the store; the file may be created later by the first save.
    ///
    /// # Errors
    ///
    /// [`NluStoreError::Io`] when the parent directory cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, NluStoreError> {
        let file = DocumentFile::open(path).map_err(map_document_error)?;
        Ok(Self {
            file: Arc::new(file),
        })
    }
}

fn map_document_error(error: DocumentError) -> NluStoreError {
    match error {
        DocumentError::Parse { message } => NluStoreError::corrupt(message),
        other => NluStoreError::io(other.to_string()),
    }
}

async fn on_blocking_pool<T, F>(task: F) -> Result<T, NluStoreError>
where
    F: FnOnce() -> Result<T, DocumentError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| NluStoreError::io(format!("example store task failed: {err}")))?
        .map_err(map_document_error)
}

#[async_trait]
impl NluExampleStore for JsonFileNluStore {
    async fn load(&self) -> Result<NluDocument, NluStoreError> {
        let file = Arc::clone(&self.file);
        on_blocking_pool(move || file.load()).await
    }

    async fn save(&self, document: &NluDocument) -> Result<(), NluStoreError> {
        let file = Arc::clone(&self.file);
        let snapshot = document.clone();
        on_blocking_pool(move || file.save(&snapshot))
            .await
            .inspect_err(|err| {
                tracing::error!(path = %self.file.path(), error = %err, "saving examples failed");
            })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use camino::Utf8PathBuf;

    fn document_path(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join("static/test.json")).expect("utf8 path")
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty_and_saves_create_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = document_path(&dir);
        let store = JsonFileNluStore::open(&path).expect("open");

        let mut document = store.load().await.expect("empty document");
        assert!(document.examples().is_empty());

        document.add_example("hello", "greet").expect("fresh");
        store.save(&document).await.expect("saved");

        let reopened = JsonFileNluStore::open(&path).expect("reopen");
        assert_eq!(reopened.load().await.expect("reload"), document);
    }

    #[tokio::test]
    async fn malformed_json_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = document_path(&dir);
        let store = JsonFileNluStore::open(&path).expect("open");
        std::fs::write(&path, "{ not json").expect("write garbage");

        let err = store.load().await.expect_err("corrupt");
        assert!(matches!(err, NluStoreError::Corrupt { .. }));
    }
}
