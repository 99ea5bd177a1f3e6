//! Driving port for editing NLU training examples.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use nlu_data::SpanViolation;

use crate::domain::Error;

/// Example texts mapped to intents, plus the distinct intent labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NluOverview {
    pub examples: BTreeMap<String, String>,
    pub intents: BTreeSet<String>,
}

#[async_trait]
pub trait NluExamples: Send + Sync {
    async fn overview(&self) -> Result<NluOverview, Error>;

    /// Append an example; a duplicate text is an invalid request.
    async fn add_example(&self, text: &str, intent: &str) -> Result<(), Error>;

    /// `NotFound` when no example has `text`.
    async fn remove_example(&self, text: &str) -> Result<(), Error>;

    /// `NotFound` when no example has `text`.
    async fn update_intent(&self, text: &str, intent: &str) -> Result<(), Error>;

    /// Entity span problems in the current document.
    async fn validate(&self) -> Result<Vec<SpanViolation>, Error>;
}
