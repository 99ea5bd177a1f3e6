//! NLU training-data document model.
//!
//! The on-disk shape is the Rasa-style envelope:
//!
//! ```json
//! {"rasa_nlu_data": {"common_examples": [
//!     {"text": "hi", "intent": "greet", "entities": []}
//! ]}}
//! ```
//!
//! Sibling keys of `common_examples` (regex features, synonyms, and so on)
//! are carried through untouched so a rewrite never drops data this crate
//! does not understand.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DocumentError, EditError};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// A labelled entity inside an example's text.
///
/// `start` and `end` are character offsets into the example text, with
/// `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Offset of the first covered character.
    pub start: usize,
    /// Offset one past the last covered character.
    pub end: usize,
    /// The covered text as recorded by the annotator.
    pub value: String,
    /// Entity label.
    pub entity: String,
}

/// One training utterance with its intent label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonExample {
    /// Utterance text.
    pub text: String,
    /// Intent label.
    pub intent: String,
    /// Entity annotations; absent in the file means none.
    #[serde(default)]
    pub entities: Vec<EntitySpan>,
}

/// A parsed NLU training-data document.
///
/// # Example
///
/// ```
/// use nlu_data::NluDocument;
///
/// let mut document = NluDocument::default();
/// document.add_example("hello", "greet").expect("fresh text");
/// assert!(document.intents().contains("greet"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NluDocument {
    rasa_nlu_data: NluData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct NluData {
    #[serde(default)]
    common_examples: Vec<CommonExample>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Why an entity span failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// `start` lies after `end`.
    StartAfterEnd {
        /// Recorded start offset.
        start: usize,
        /// Recorded end offset.
        end: usize,
    },
    /// `end` points past the end of the text.
    OutOfBounds {
        /// Recorded end offset.
        end: usize,
        /// Character length of the example text.
        length: usize,
    },
    /// The recorded value differs from the covered text.
    ValueMismatch {
        /// Text covered by the span.
        covered: String,
        /// Value stored in the annotation.
        recorded: String,
    },
}

/// A span violation located by example index and entity label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanViolation {
    /// Index of the offending example in document order.
    pub example: usize,
    /// Text of the offending example.
    pub text: String,
    /// Entity label of the offending span.
    pub entity: String,
    /// What is wrong with the span.
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl NluDocument {
    /// Parses a document from JSON, tolerating a leading byte-order mark.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] when the JSON is malformed or the
    /// `rasa_nlu_data` root is missing.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let body = json.strip_prefix(BYTE_ORDER_MARK).unwrap_or(json);
        serde_json::from_str(body).map_err(|err| DocumentError::Parse {
            message: err.to_string(),
        })
    }

    /// Encodes the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Encode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|err| DocumentError::Encode {
            message: err.to_string(),
        })
    }

    /// Returns the examples in document order.
    #[must_use]
    pub fn examples(&self) -> &[CommonExample] {
        &self.rasa_nlu_data.common_examples
    }

    /// Maps each example text to its intent label.
    #[must_use]
    pub fn intent_by_text(&self) -> BTreeMap<String, String> {
        self.examples()
            .iter()
            .map(|example| (example.text.clone(), example.intent.clone()))
            .collect()
    }

    /// Returns the distinct intent labels in sorted order.
    #[must_use]
    pub fn intents(&self) -> BTreeSet<String> {
        self.examples()
            .iter()
            .map(|example| example.intent.clone())
            .collect()
    }

    /// Appends an example with no entity annotations.
    ///
    /// Text and intent are trimmed before storage.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::BlankField`] for blank input and
    /// [`EditError::DuplicateText`] when the text is already present.
    pub fn add_example(&mut self, text: &str, intent: &str) -> Result<(), EditError> {
        let trimmed_text = required("text", text)?;
        let trimmed_intent = required("intent", intent)?;
        if self.position_of(trimmed_text).is_some() {
            return Err(EditError::DuplicateText {
                text: trimmed_text.to_owned(),
            });
        }
        self.rasa_nlu_data.common_examples.push(CommonExample {
            text: trimmed_text.to_owned(),
            intent: trimmed_intent.to_owned(),
            entities: Vec::new(),
        });
        Ok(())
    }

    /// Removes the example with the given text and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownText`] when no example matches.
    pub fn remove_example(&mut self, text: &str) -> Result<CommonExample, EditError> {
        let trimmed_text = required("text", text)?;
        let position = self
            .position_of(trimmed_text)
            .ok_or_else(|| EditError::UnknownText {
                text: trimmed_text.to_owned(),
            })?;
        Ok(self.rasa_nlu_data.common_examples.remove(position))
    }

    /// Relabels the example with the given text.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::BlankField`] for blank input and
    /// [`EditError::UnknownText`] when no example matches.
    pub fn set_intent(&mut self, text: &str, intent: &str) -> Result<(), EditError> {
        let trimmed_text = required("text", text)?;
        let trimmed_intent = required("intent", intent)?;
        let example = self
            .rasa_nlu_data
            .common_examples
            .iter_mut()
            .find(|example| example.text == trimmed_text)
            .ok_or_else(|| EditError::UnknownText {
                text: trimmed_text.to_owned(),
            })?;
        trimmed_intent.clone_into(&mut example.intent);
        Ok(())
    }

    /// Checks every entity span against its example text.
    ///
    /// An empty result means the document is consistent.
    #[must_use]
    pub fn validate(&self) -> Vec<SpanViolation> {
        self.examples()
            .iter()
            .enumerate()
            .flat_map(|(index, example)| {
                example.entities.iter().filter_map(move |span| {
                    span_violation(example, span).map(|kind| SpanViolation {
                        example: index,
                        text: example.text.clone(),
                        entity: span.entity.clone(),
                        kind,
                    })
                })
            })
            .collect()
    }

    fn position_of(&self, text: &str) -> Option<usize> {
        self.examples()
            .iter()
            .position(|example| example.text == text)
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, EditError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EditError::BlankField { field });
    }
    Ok(trimmed)
}

fn span_violation(example: &CommonExample, span: &EntitySpan) -> Option<ViolationKind> {
    let length = example.text.chars().count();
    if span.start > span.end {
        return Some(ViolationKind::StartAfterEnd {
            start: span.start,
            end: span.end,
        });
    }
    if span.end > length {
        return Some(ViolationKind::OutOfBounds {
            end: span.end,
            length,
        });
    }
    let covered: String = example
        .text
        .chars()
        .skip(span.start)
        .take(span.end - span.start)
        .collect();
    (covered != span.value).then(|| ViolationKind::ValueMismatch {
        covered,
        recorded: span.value.clone(),
    })
}
