//! NLU training-data documents: parsing, editing, and atomic rewrites.
//!
//! The crate knows nothing about HTTP or databases. It owns the document
//! format and the file discipline around it, and leaves serialising
//! concurrent writers to the caller.
//!
//! # Example
//!
//! ```
//! use nlu_data::NluDocument;
//!
//! let json = r#"{"rasa_nlu_data": {"common_examples": [
//!     {"text": "hi", "intent": "greet", "entities": []}
//! ]}}"#;
//!
//! let mut document = NluDocument::from_json(json).expect("valid document");
//! document.set_intent("hi", "salutation").expect("known text");
//! assert_eq!(document.intent_by_text().get("hi").map(String::as_str), Some("salutation"));
//! ```

mod atomic_io;
mod document;
mod error;
mod store;

pub use document::{CommonExample, EntitySpan, NluDocument, SpanViolation, ViolationKind};
pub use error::{DocumentError, EditError};
pub use store::DocumentFile;
