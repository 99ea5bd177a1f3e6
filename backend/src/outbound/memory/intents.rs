use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{IntentPersistenceError, IntentRepository};
use crate::domain::{Intent, IntentId};

use super::POISONED;

/// Intent catalogue held in memory; names are unique.
#[derive(Debug, Default)]
pub struct MemoryIntentRepository {
    intents: Mutex<Vec<Intent>>,
}

impl MemoryIntentRepository {
    fn with_intents<T>(
        &self,
        f: impl FnOnce(&mut Vec<Intent>) -> Result<T, IntentPersistenceError>,
    ) -> Result<T, IntentPersistenceError> {
        let mut intents = self
            .intents
            .lock()
            .map_err(|_| IntentPersistenceError::query(POISONED))?;
        f(&mut intents)
    }
}

#[async_trait]
impl IntentRepository for MemoryIntentRepository {
    async fn list(&self) -> Result<Vec<Intent>, IntentPersistenceError> {
        self.with_intents(|intents| {
            let mut sorted = intents.clone();
            sorted.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(sorted)
        })
    }

    async fn insert(&self, intent: &Intent) -> Result<(), IntentPersistenceError> {
        self.with_intents(|intents| {
            if intents.iter().any(|stored| stored.name == intent.name) {
                return Err(IntentPersistenceError::duplicate_name());
            }
            intents.push(intent.clone());
            Ok(())
        })
    }

    async fn update(&self, intent: &Intent) -> Result<bool, IntentPersistenceError> {
        self.with_intents(|intents| {
            if !intents.iter().any(|stored| stored.id == intent.id) {
                return Ok(false);
            }
            if intents
                .iter()
                .any(|stored| stored.name == intent.name && stored.id != intent.id)
            {
                return Err(IntentPersistenceError::duplicate_name());
            }
            if let Some(stored) = intents.iter_mut().find(|stored| stored.id == intent.id) {
                *stored = intent.clone();
            }
            Ok(true)
        })
    }

    async fn delete(&self, id: &IntentId) -> Result<bool, IntentPersistenceError> {
        self.with_intents(|intents| {
            let before = intents.len();
            intents.retain(|stored| &stored.id != id);
            Ok(intents.len() < before)
        })
    }
}
