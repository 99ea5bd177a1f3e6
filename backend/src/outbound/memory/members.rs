use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{MemberPersistenceError, MemberRepository};
use crate::domain::{EmailAddress, Member, MemberDraft, MemberId};

use super::POISONED;

#[derive(Debug, Default)]
struct Directory {
    next_id: i32,
    members: Vec<Member>,
}

/// Members directory held in memory; ids count up from 1.
#[derive(Debug, Default)]
pub struct MemoryMemberRepository {
    directory: Mutex<Directory>,
}

impl MemoryMemberRepository {
    fn with_directory<T>(
        &self,
        f: impl FnOnce(&mut Directory) -> Result<T, MemberPersistenceError>,
    ) -> Result<T, MemberPersistenceError> {
        let mut directory = self
            .directory
            .lock()
            .map_err(|_| MemberPersistenceError::query(POISONED))?;
        f(&mut directory)
    }
}

fn email_taken(members: &[Member], email: &EmailAddress, except: Option<MemberId>) -> bool {
    members
        .iter()
        .any(|member| &member.email == email && Some(member.id) != except)
}

#[async_trait]
impl MemberRepository for MemoryMemberRepository {
    async fn insert(&self, draft: &MemberDraft) -> Result<Member, MemberPersistenceError> {
        self.with_directory(|directory| {
            if email_taken(&directory.members, &draft.email, None) {
                return Err(MemberPersistenceError::duplicate_email());
            }
            directory.next_id += 1;
            let member = Member::from_draft(MemberId::new(directory.next_id), draft.clone());
            directory.members.push(member.clone());
            Ok(member)
        })
    }

    async fn list(&self) -> Result<Vec<Member>, MemberPersistenceError> {
        self.with_directory(|directory| Ok(directory.members.clone()))
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, MemberPersistenceError> {
        self.with_directory(|directory| {
            Ok(directory.members.iter().find(|m| m.id == id).cloned())
        })
    }

    async fn update(&self, member: &Member) -> Result<bool, MemberPersistenceError> {
        self.with_directory(|directory| {
            if !directory.members.iter().any(|m| m.id == member.id) {
                return Ok(false);
            }
            if email_taken(&directory.members, &member.email, Some(member.id)) {
                return Err(MemberPersistenceError::duplicate_email());
            }
            if let Some(stored) = directory.members.iter_mut().find(|m| m.id == member.id) {
                *stored = member.clone();
            }
            Ok(true)
        })
    }

    async fn delete_by_email(&self, email: &EmailAddress) -> Result<bool, MemberPersistenceError> {
        self.with_directory(|directory| {
            let before = directory.members.len();
            directory.members.retain(|m| &m.email != email);
            Ok(directory.members.len() < before)
        })
    }
}
