//! Intent catalogue service.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::nlu_service::map_store_error;
use crate::domain::ports::{
    IntentCatalogue, IntentPersistenceError, IntentRepository, NluExampleStore,
};
use crate::domain::{Error, Intent, IntentId, IntentName};

/// Implements [`IntentCatalogue`]; the example store feeds
/// [`IntentCatalogue::import_from_examples`].
#[derive(Clone)]
pub struct IntentService<R, S> {
    intents: Arc<R>,
    examples: Arc<S>,
}

impl<R, S> IntentService<R, S> {
    pub fn new(intents: Arc<R>, examples: Arc<S>) -> Self {
        Self { intents, examples }
    }
}

fn map_intent_error(error: IntentPersistenceError) -> Error {
    match error {
        IntentPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("intent repository unavailable: {message}"))
        }
        IntentPersistenceError::Query { message } => {
            Error::internal(format!("intent repository error: {message}"))
        }
        IntentPersistenceError::DuplicateName => Error::invalid_request("Intent already exists"),
    }
}

#[async_trait]
impl<R, S> IntentCatalogue for IntentService<R, S>
where
    R: IntentRepository,
    S: NluExampleStore,
{
    async fn list(&self) -> Result<Vec<Intent>, Error> {
        self.intents.list().await.map_err(map_intent_error)
    }

    async fn add(&self, name: IntentName, description: String) -> Result<Intent, Error> {
        let intent = Intent {
            id: IntentId::random(),
            name,
            description,
        };
        self.intents
            .insert(&intent)
            .await
            .map_err(map_intent_error)?;
        Ok(intent)
    }

    async fn update(
        &self,
        id: IntentId,
        name: IntentName,
        description: String,
    ) -> Result<Intent, Error> {
        let intent = Intent {
            id,
            name,
            description,
        };
        if self
            .intents
            .update(&intent)
            .await
            .map_err(map_intent_error)?
        {
            Ok(intent)
        } else {
            Err(Error::not_found(format!("No intent with id {id}")))
        }
    }

    async fn remove(&self, id: IntentId) -> Result<(), Error> {
        if self.intents.delete(&id).await.map_err(map_intent_error)? {
            Ok(())
        } else {
            Err(Error::not_found(format!("No intent with id {id}")))
        }
    }

    async fn import_from_examples(&self) -> Result<Vec<Intent>, Error> {
        let document = self.examples.load().await.map_err(map_store_error)?;
        let known: BTreeSet<String> = self
            .intents
            .list()
            .await
            .map_err(map_intent_error)?
            .into_iter()
            .map(|intent| intent.name.as_str().to_owned())
            .collect();

        let mut added = Vec::new();
        for label in document.intents().difference(&known) {
            let name = match IntentName::new(label) {
                Ok(name) => name,
                Err(err) => {
                    tracing::warn!(label = %label, error = %err, "skipping unusable intent label");
                    continue;
                }
            };
            let intent = Intent {
                id: IntentId::random(),
                description: label.clone(),
                name,
            };
            match self.intents.insert(&intent).await {
                Ok(()) => added.push(intent),
                Err(IntentPersistenceError::DuplicateName) => {}
                Err(other) => return Err(map_intent_error(other)),
            }
        }
        tracing::info!(count = added.len(), "imported intents from examples");
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockIntentRepository, MockNluExampleStore};
    use nlu_data::NluDocument;

    fn intent(name: &str) -> Intent {
        Intent {
            id: IntentId::random(),
            name: IntentName::new(name).expect("name"),
            description: String::new(),
        }
    }

    fn document_with(pairs: &[(&str, &str)]) -> NluDocument {
        let mut document = NluDocument::default();
        for (text, label) in pairs {
            document.add_example(text, label).expect("unique text");
        }
        document
    }

    #[tokio::test]
    async fn import_adds_only_unknown_labels() {
        let mut store = MockNluExampleStore::new();
        store.expect_load().return_once(|| {
            Ok(document_with(&[
                ("hi", "greet"),
                ("bye", "goodbye"),
                ("find food", "restaurant_search"),
            ]))
        });
        let mut repo = MockIntentRepository::new();
        repo.expect_list().return_once(|| Ok(vec![intent("greet")]));
        repo.expect_insert().times(2).returning(|_| Ok(()));

        let added = IntentService::new(Arc::new(repo), Arc::new(store))
            .import_from_examples()
            .await
            .expect("imported");
        let names: Vec<&str> = added.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["goodbye", "restaurant_search"]);
        assert!(added.iter().all(|i| i.description == i.name.as_str()));
    }

    #[tokio::test]
    async fn import_skips_labels_that_are_not_single_tokens() {
        let mut store = MockNluExampleStore::new();
        store
            .expect_load()
            .return_once(|| Ok(document_with(&[("hi", "greet politely")])));
        let mut repo = MockIntentRepository::new();
        repo.expect_list().return_once(|| Ok(Vec::new()));
        repo.expect_insert().never();

        let added = IntentService::new(Arc::new(repo), Arc::new(store))
            .import_from_examples()
            .await
            .expect("imported");
        assert!(added.is_empty());
    }

    #[tokio::test]
    async fn duplicate_names_are_invalid_requests() {
        let mut repo = MockIntentRepository::new();
        repo.expect_insert()
            .return_once(|_| Err(IntentPersistenceError::duplicate_name()));

        let err = IntentService::new(Arc::new(repo), Arc::new(MockNluExampleStore::new()))
            .add(IntentName::new("greet").expect("name"), String::new())
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Intent already exists");
    }

    #[tokio::test]
    async fn remove_reports_unknown_ids() {
        let mut repo = MockIntentRepository::new();
        repo.expect_delete().return_once(|_| Ok(false));

        let err = IntentService::new(Arc::new(repo), Arc::new(MockNluExampleStore::new()))
            .remove(IntentId::random())
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
