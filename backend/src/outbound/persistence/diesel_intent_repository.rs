//! PostgreSQL-backed `IntentRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IntentPersistenceError, IntentRepository};
use crate::domain::{Intent, IntentId, IntentName};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, unique_violation};
use super::models::{IntentChanges, IntentRow};
use super::pool::{DbPool, PoolError};
use super::schema::intents;

#[derive(Clone)]
pub struct DieselIntentRepository {
    pool: DbPool,
}

impl DieselIntentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> IntentPersistenceError {
    map_pool_error(error, IntentPersistenceError::connection)
}

fn diesel_error(error: DieselError) -> IntentPersistenceError {
    if unique_violation(&error).is_some() {
        return IntentPersistenceError::duplicate_name();
    }
    map_diesel_error(
        error,
        |message| IntentPersistenceError::query(message),
        |message| IntentPersistenceError::connection(message),
    )
}

fn row_to_intent(row: IntentRow) -> Result<Intent, IntentPersistenceError> {
    let name = IntentName::new(&row.name).map_err(|err| {
        tracing::warn!(intent_id = %row.id, error = %err, "stored intent name is invalid");
        IntentPersistenceError::query("stored intent row is invalid")
    })?;
    Ok(Intent {
        id: IntentId::from_uuid(row.id),
        name,
        description: row.description,
    })
}

#[async_trait]
impl IntentRepository for DieselIntentRepository {
    async fn list(&self) -> Result<Vec<Intent>, IntentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<IntentRow> = intents::table
            .order(intents::name.asc())
            .select(IntentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_intent).collect()
    }

    async fn insert(&self, intent: &Intent) -> Result<(), IntentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(intents::table)
            .values(&IntentRow {
                id: *intent.id.as_uuid(),
                name: intent.name.as_str().to_owned(),
                description: intent.description.clone(),
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn update(&self, intent: &Intent) -> Result<bool, IntentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(intents::table.find(*intent.id.as_uuid()))
            .set(&IntentChanges {
                name: intent.name.as_str(),
                description: &intent.description,
            })
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &IntentId) -> Result<bool, IntentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(intents::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }
}
