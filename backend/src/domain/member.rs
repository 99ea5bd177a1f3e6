//! Members directory entries: a name and a unique email.

use std::fmt;

use super::user::{EmailAddress, UserValidationError};

const NAME_MAX: usize = 100;

/// Validation failures for member payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemberValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error(transparent)]
    Email(#[from] UserValidationError),
}

impl MemberValidationError {
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::Email(inner) => inner.field(),
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::Email(inner) => inner.code(),
        }
    }
}

/// Store-assigned sequential identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(i32);

impl MemberId {
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated name and email for a member that may not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: String,
    pub email: EmailAddress,
}

impl MemberDraft {
    pub fn try_from_parts(name: &str, email: &str) -> Result<Self, MemberValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(MemberValidationError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(MemberValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self {
            name: trimmed.to_owned(),
            email: EmailAddress::new(email)?,
        })
    }
}

/// A stored directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: EmailAddress,
}

impl Member {
    #[must_use]
    pub fn from_draft(id: MemberId, draft: MemberDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
        }
    }
}
