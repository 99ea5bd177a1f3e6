//! File-backed access to a single NLU document.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;

use crate::atomic_io::write_atomic;
use crate::document::NluDocument;
use crate::error::DocumentError;

/// Handle on the directory holding an NLU document file.
///
/// The parent directory is opened once as a capability; every read and write
/// afterwards is scoped to it.
#[derive(Debug)]
pub struct DocumentFile {
    dir: Dir,
    file_name: Utf8PathBuf,
    path: Utf8PathBuf,
}

impl DocumentFile {
    /// Opens the directory containing `path`, creating it when absent.
    ///
    /// The document file itself need not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidPath`] when `path` has no file name and
    /// [`DocumentError::Read`] when the parent directory cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, DocumentError> {
        let file_name = path.file_name().ok_or_else(|| DocumentError::InvalidPath {
            path: path.as_std_path().to_path_buf(),
        })?;
        let parent = path
            .parent()
            .filter(|candidate| !candidate.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::create_ambient_dir_all(parent, ambient_authority())
            .and_then(|()| Dir::open_ambient_dir(parent, ambient_authority()))
            .map_err(|err| DocumentError::Read {
                path: parent.as_std_path().to_path_buf(),
                message: err.to_string(),
            })?;

        Ok(Self {
            dir,
            file_name: Utf8PathBuf::from(file_name),
            path: path.to_path_buf(),
        })
    }

    /// Returns the configured document path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Reads and parses the document.
    ///
    /// A missing file yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Read`] for I/O failures other than a missing
    /// file, and [`DocumentError::Parse`] for malformed contents.
    pub fn load(&self) -> Result<NluDocument, DocumentError> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => NluDocument::from_json(&contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(NluDocument::default()),
            Err(err) => Err(DocumentError::Read {
                path: self.path.as_std_path().to_path_buf(),
                message: err.to_string(),
            }),
        }
    }

    /// Atomically replaces the file with `document`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Encode`] or [`DocumentError::Write`] on
    /// failure; the previous file contents are left intact.
    pub fn save(&self, document: &NluDocument) -> Result<(), DocumentError> {
        let json = document.to_json()?;
        write_atomic(&self.dir, &self.file_name, &json).map_err(|err| match err {
            DocumentError::Write { message, .. } => DocumentError::Write {
                path: self.path.as_std_path().to_path_buf(),
                message,
            },
            other => other,
        })
    }
}
