//! Members directory service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{MemberDirectory, MemberPersistenceError, MemberRepository};
use crate::domain::{EmailAddress, Error, Member, MemberDraft, MemberId};

/// Implements [`MemberDirectory`] over a [`MemberRepository`].
#[derive(Clone)]
pub struct MemberService<R> {
    members: Arc<R>,
}

impl<R> MemberService<R> {
    pub fn new(members: Arc<R>) -> Self {
        Self { members }
    }
}

fn map_member_error(error: MemberPersistenceError) -> Error {
    match error {
        MemberPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("member repository unavailable: {message}"))
        }
        MemberPersistenceError::Query { message } => {
            Error::internal(format!("member repository error: {message}"))
        }
        MemberPersistenceError::DuplicateEmail => Error::invalid_request("Member already exists"),
    }
}

fn member_not_found(id: MemberId) -> Error {
    Error::not_found(format!("No member with id {id}"))
}

#[async_trait]
impl<R> MemberDirectory for MemberService<R>
where
    R: MemberRepository,
{
    async fn add(&self, draft: MemberDraft) -> Result<Member, Error> {
        let member = self.members.insert(&draft).await.map_err(map_member_error)?;
        tracing::info!(member_id = %member.id, "member added");
        Ok(member)
    }

    async fn list(&self) -> Result<Vec<Member>, Error> {
        let members = self.members.list().await.map_err(map_member_error)?;
        if members.is_empty() {
            return Err(Error::not_found("No members found"));
        }
        Ok(members)
    }

    async fn get(&self, id: MemberId) -> Result<Member, Error> {
        self.members
            .find_by_id(id)
            .await
            .map_err(map_member_error)?
            .ok_or_else(|| member_not_found(id))
    }

    async fn update(&self, id: MemberId, draft: MemberDraft) -> Result<Member, Error> {
        let member = Member::from_draft(id, draft);
        if self.members.update(&member).await.map_err(map_member_error)? {
            Ok(member)
        } else {
            Err(member_not_found(id))
        }
    }

    async fn remove_by_email(&self, email: &EmailAddress) -> Result<(), Error> {
        if self
            .members
            .delete_by_email(email)
            .await
            .map_err(map_member_error)?
        {
            Ok(())
        } else {
            Err(Error::not_found(format!("No member with email {email}")))
        }
    }
}
