//! Error types for the nlu-data crate.
//!
//! Document errors cover reading, parsing, and rewriting the backing file.
//! Edit errors describe rejected mutations of an in-memory document.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or persisting an NLU document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The document file could not be read.
    #[error("failed to read NLU document at '{path}': {message}")]
    Read {
        /// Path to the document file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The document JSON is malformed or lacks the `rasa_nlu_data` root.
    #[error("invalid NLU document JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },

    /// The document could not be written back to disk.
    #[error("failed to write NLU document at '{path}': {message}")]
    Write {
        /// Path that was being written.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The in-memory document could not be encoded as JSON.
    #[error("failed to encode NLU document: {message}")]
    Encode {
        /// Description of the encoding error.
        message: String,
    },

    /// The configured location does not name a file.
    #[error("NLU document path '{path}' must name a file")]
    InvalidPath {
        /// The rejected path.
        path: PathBuf,
    },
}

/// Errors raised when an edit would break document invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A required field was empty after trimming.
    #[error("{field} must not be blank")]
    BlankField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// An example with the same text already exists.
    #[error("an example with text '{text}' already exists")]
    DuplicateText {
        /// The duplicated example text.
        text: String,
    },

    /// No example carries the requested text.
    #[error("no example with text '{text}'")]
    UnknownText {
        /// The text that was not found.
        text: String,
    },
}
