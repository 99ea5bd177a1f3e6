//! Port abstraction for the members directory store.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Member, MemberDraft, MemberId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by member repository adapters.
    pub enum MemberPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "member repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "member repository query failed: {message}",
        /// Another member already uses the email address.
        DuplicateEmail => "member email already in use",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Store a new member and return it with its assigned id.
    async fn insert(&self, draft: &MemberDraft) -> Result<Member, MemberPersistenceError>;

    /// All members ordered by id.
    async fn list(&self) -> Result<Vec<Member>, MemberPersistenceError>;

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, MemberPersistenceError>;

    /// Overwrite name and email; `false` when the id is unknown.
    async fn update(&self, member: &Member) -> Result<bool, MemberPersistenceError>;

    /// Delete by email; `false` when nobody uses it.
    async fn delete_by_email(&self, email: &EmailAddress) -> Result<bool, MemberPersistenceError>;
}
