//! Port abstraction for the intent catalogue store.

use async_trait::async_trait;

use crate::domain::{Intent, IntentId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by intent repository adapters.
    pub enum IntentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "intent repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "intent repository query failed: {message}",
        /// Another intent already uses the name.
        DuplicateName => "intent name already in use",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntentRepository: Send + Sync {
    /// All intents ordered by name.
    async fn list(&self) -> Result<Vec<Intent>, IntentPersistenceError>;

    async fn insert(&self, intent: &Intent) -> Result<(), IntentPersistenceError>;

    /// Overwrite name and description; `false` when the id is unknown.
    async fn update(&self, intent: &Intent) -> Result<bool, IntentPersistenceError>;

    /// `false` when the id is unknown.
    async fn delete(&self, id: &IntentId) -> Result<bool, IntentPersistenceError>;
}
