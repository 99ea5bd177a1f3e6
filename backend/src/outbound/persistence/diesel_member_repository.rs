//! PostgreSQL-backed `MemberRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MemberPersistenceError, MemberRepository};
use crate::domain::{EmailAddress, Member, MemberDraft, MemberId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, unique_violation};
use super::models::{MemberFields, MemberRow};
use super::pool::{DbPool, PoolError};
use super::schema::members;

#[derive(Clone)]
pub struct DieselMemberRepository {
    pool: DbPool,
}

impl DieselMemberRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> MemberPersistenceError {
    map_pool_error(error, MemberPersistenceError::connection)
}

fn diesel_error(error: DieselError) -> MemberPersistenceError {
    if unique_violation(&error).is_some() {
        return MemberPersistenceError::duplicate_email();
    }
    map_diesel_error(
        error,
        |message| MemberPersistenceError::query(message),
        |message| MemberPersistenceError::connection(message),
    )
}

fn row_to_member(row: MemberRow) -> Result<Member, MemberPersistenceError> {
    let email = EmailAddress::new(&row.email).map_err(|err| {
        tracing::warn!(member_id = row.id, error = %err, "stored member email is invalid");
        MemberPersistenceError::query("stored member row is invalid")
    })?;
    Ok(Member {
        id: MemberId::new(row.id),
        name: row.name,
        email,
    })
}

#[async_trait]
impl MemberRepository for DieselMemberRepository {
    async fn insert(&self, draft: &MemberDraft) -> Result<Member, MemberPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: MemberRow = diesel::insert_into(members::table)
            .values(&MemberFields {
                name: &draft.name,
                email: draft.email.as_str(),
            })
            .returning(MemberRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        row_to_member(row)
    }

    async fn list(&self) -> Result<Vec<Member>, MemberPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<MemberRow> = members::table
            .order(members::id.asc())
            .select(MemberRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_member).collect()
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, MemberPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<MemberRow> = members::table
            .find(id.value())
            .select(MemberRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_member).transpose()
    }

    async fn update(&self, member: &Member) -> Result<bool, MemberPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(members::table.find(member.id.value()))
            .set(&MemberFields {
                name: &member.name,
                email: member.email.as_str(),
            })
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete_by_email(&self, email: &EmailAddress) -> Result<bool, MemberPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(members::table.filter(members::email.eq(email.as_str())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }
}
