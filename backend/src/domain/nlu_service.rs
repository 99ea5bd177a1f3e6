//! Editing service for the NLU example document.
//!
//! Every edit is a load, modify, save cycle over the whole document. The
//! service holds an async mutex across that cycle so concurrent requests
//! never overwrite each other's additions.

use std::sync::Arc;

use async_trait::async_trait;
use nlu_data::{EditError, NluDocument, SpanViolation};
use tokio::sync::Mutex;

use crate::domain::Error;
use crate::domain::ports::{NluExampleStore, NluExamples, NluOverview, NluStoreError};

/// Implements [`NluExamples`] over an [`NluExampleStore`].
#[derive(Clone)]
pub struct NluService<S> {
    store: Arc<S>,
    edit_lock: Arc<Mutex<()>>,
}

impl<S> NluService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            edit_lock: Arc::new(Mutex::new(())),
        }
    }
}

pub(crate) fn map_store_error(error: NluStoreError) -> Error {
    match error {
        NluStoreError::Io { message } => {
            Error::internal(format!("example store I/O failed: {message}"))
        }
        NluStoreError::Corrupt { message } => Error::internal("example document is corrupt")
            .with_details(serde_json::json!({ "code": "corrupt_document", "reason": message })),
    }
}

fn map_edit_error(error: EditError) -> Error {
    match error {
        EditError::BlankField { .. } => Error::invalid_request(error.to_string()),
        EditError::DuplicateText { .. } => Error::invalid_request("Example already exists"),
        EditError::UnknownText { .. } => Error::not_found(error.to_string()),
    }
}

impl<S> NluService<S>
where
    S: NluExampleStore,
{
    async fn edit<F>(&self, change: F) -> Result<(), Error>
    where
        F: FnOnce(&mut NluDocument) -> Result<(), EditError> + Send,
    {
        let _guard = self.edit_lock.lock().await;
        let mut document = self.store.load().await.map_err(map_store_error)?;
        change(&mut document).map_err(map_edit_error)?;
        self.store.save(&document).await.map_err(map_store_error)
    }
}

#[async_trait]
impl<S> NluExamples for NluService<S>
where
    S: NluExampleStore,
{
    async fn overview(&self) -> Result<NluOverview, Error> {
        let document = self.store.load().await.map_err(map_store_error)?;
        Ok(NluOverview {
            examples: document.intent_by_text(),
            intents: document.intents(),
        })
    }

    async fn add_example(&self, text: &str, intent: &str) -> Result<(), Error> {
        self.edit(|document| document.add_example(text, intent))
            .await
    }

    async fn remove_example(&self, text: &str) -> Result<(), Error> {
        self.edit(|document| document.remove_example(text).map(|_| ()))
            .await
    }

    async fn update_intent(&self, text: &str, intent: &str) -> Result<(), Error> {
        self.edit(|document| document.set_intent(text, intent)).await
    }

    async fn validate(&self) -> Result<Vec<SpanViolation>, Error> {
        let document = self.store.load().await.map_err(map_store_error)?;
        Ok(document.validate())
    }
}
