//! Atomic file replacement.
//!
//! Contents are written to a hidden sibling file, synced, and renamed over
//! the target, so a reader sees either the old or the new document and
//! never a truncated one.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

use crate::error::DocumentError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replaces `path` inside `dir` with `contents`.
///
/// # Errors
///
/// Returns [`DocumentError::InvalidPath`] when `path` is not a single file
/// name and [`DocumentError::Write`] when any filesystem step fails.
pub(crate) fn write_atomic(dir: &Dir, path: &Utf8Path, contents: &str) -> Result<(), DocumentError> {
    let mut components = path.components();
    let (Some(Utf8Component::Normal(file_name)), None) = (components.next(), components.next())
    else {
        return Err(DocumentError::InvalidPath {
            path: path.as_std_path().to_path_buf(),
        });
    };
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(".{file_name}.{}.{stamp}.{counter}.tmp", std::process::id());

    if let Err(err) = write_temp_file(dir, &tmp_name, contents) {
        discard(dir, &tmp_name);
        return Err(write_error(path.with_file_name(&tmp_name).as_std_path(), &err));
    }
    if let Err(err) = dir.rename(&tmp_name, dir, file_name) {
        discard(dir, &tmp_name);
        return Err(write_error(path.as_std_path(), &err));
    }
    sync_directory(dir);
    Ok(())
}

fn write_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

fn discard(dir: &Dir, tmp_name: &str) {
    if dir.remove_file(tmp_name).is_err() {
        // The temp file may never have been created.
    }
}

fn sync_directory(dir: &Dir) {
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Directory fsync is unsupported on some platforms.
    }
}

fn write_error(path: &std::path::Path, err: &io::Error) -> DocumentError {
    DocumentError::Write {
        path: PathBuf::from(path),
        message: err.to_string(),
    }
}
