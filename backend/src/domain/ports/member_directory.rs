//! Driving port for the members directory.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, Member, MemberDraft, MemberId};

#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Add a member; a taken email is an invalid request.
    async fn add(&self, draft: MemberDraft) -> Result<Member, Error>;

    /// Every member; an empty directory is `NotFound`.
    async fn list(&self) -> Result<Vec<Member>, Error>;

    async fn get(&self, id: MemberId) -> Result<Member, Error>;

    async fn update(&self, id: MemberId, draft: MemberDraft) -> Result<Member, Error>;

    async fn remove_by_email(&self, email: &EmailAddress) -> Result<(), Error>;
}
