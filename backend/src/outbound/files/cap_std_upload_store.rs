//! `UploadStore` confined to one root directory with `cap-std`.
//!
//! All paths are resolved relative to the opened root handle, so even a
//! file name that slipped past validation cannot escape it.

use std::sync::Arc;

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::Dir;

use crate::domain::UploadFileName;
use crate::domain::ports::{UploadStore, UploadStoreError};

/// Writes uploads beneath a fixed root, one subdirectory per category.
#[derive(Clone)]
pub struct CapStdUploadStore {
    root: Arc<Dir>,
}

impl CapStdUploadStore {
    /// Open `root`, creating it when missing.
    ///
    /// # Errors
    ///
    /// [`UploadStoreError::Io`] when the directory cannot be created or
    /// opened.
    pub fn open(root: &Utf8Path) -> Result<Self, UploadStoreError> {
        Dir::create_ambient_dir_all(root, ambient_authority())
            .and_then(|()| Dir::open_ambient_dir(root, ambient_authority()))
            .map(|dir| Self {
                root: Arc::new(dir),
            })
            .map_err(|err| UploadStoreError::io(format!("upload root '{root}': {err}")))
    }
}

fn write_file(
    root: &Dir,
    directory: &str,
    file_name: &str,
    bytes: &[u8],
) -> std::io::Result<()> {
    root.create_dir_all(directory)?;
    let target = root.open_dir(directory)?;
    target.write(file_name, bytes)
}

#[async_trait]
impl UploadStore for CapStdUploadStore {
    async fn store(
        &self,
        directory: &str,
        file_name: &UploadFileName,
        bytes: Vec<u8>,
    ) -> Result<String, UploadStoreError> {
        let root = Arc::clone(&self.root);
        let relative = format!("{directory}/{}", file_name.as_str());
        let dir_name = directory.to_owned();
        let name = file_name.as_str().to_owned();
        tokio::task::spawn_blocking(move || write_file(&root, &dir_name, &name, &bytes))
            .await
            .map_err(|err| UploadStoreError::io(format!("upload task failed: {err}")))?
            .map_err(|err| {
                tracing::warn!(path = %relative, error = %err, "writing upload failed");
                UploadStoreError::io(err.to_string())
            })?;
        Ok(relative)
    }
}
