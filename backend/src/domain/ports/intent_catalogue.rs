//! Driving port for the intent catalogue.

use async_trait::async_trait;

use crate::domain::{Error, Intent, IntentId, IntentName};

#[async_trait]
pub trait IntentCatalogue: Send + Sync {
    async fn list(&self) -> Result<Vec<Intent>, Error>;

    /// Add an intent; a taken name is an invalid request.
    async fn add(&self, name: IntentName, description: String) -> Result<Intent, Error>;

    async fn update(
        &self,
        id: IntentId,
        name: IntentName,
        description: String,
    ) -> Result<Intent, Error>;

    async fn remove(&self, id: IntentId) -> Result<(), Error>;

    /// Catalogue every intent label found in the NLU examples that is not
    /// already present; returns the newly added intents.
    async fn import_from_examples(&self) -> Result<Vec<Intent>, Error>;
}
