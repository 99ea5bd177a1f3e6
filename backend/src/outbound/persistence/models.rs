//! Internal Diesel row structs.
//!
//! Rows never leave the persistence module; repositories convert them into
//! domain types at the boundary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{employees, intents, members, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[expect(dead_code, reason = "selected for row completeness; not surfaced")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MemberRow {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Insert and update payload for members; the serial id is left to Postgres.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = members)]
pub(crate) struct MemberFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub id: Uuid,
    pub name: String,
    pub gf: bool,
    pub address: String,
    pub salary: i64,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = employees)]
pub(crate) struct EmployeeChanges<'a> {
    pub name: &'a str,
    pub gf: bool,
    pub address: &'a str,
    pub salary: i64,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = intents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IntentRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = intents)]
pub(crate) struct IntentChanges<'a> {
    pub name: &'a str,
    pub description: &'a str,
}
