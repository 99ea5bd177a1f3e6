//! Intent catalogue entries.

use std::fmt;

use uuid::Uuid;

const NAME_MAX: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntentValidationError {
    #[error("intent id must be a valid UUID")]
    InvalidId,
    #[error("intent name must not be empty")]
    EmptyName,
    #[error("intent name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("intent name must not contain whitespace")]
    NameWhitespace,
}

impl IntentValidationError {
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyName | Self::NameTooLong { .. } | Self::NameWhitespace => "name",
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::NameWhitespace => "name_whitespace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntentId(Uuid);

impl IntentId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IntentValidationError> {
        Uuid::parse_str(raw.as_ref().trim())
            .map(Self)
            .map_err(|_| IntentValidationError::InvalidId)
    }

    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Intent label: a single token such as `restaurant_search`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntentName(String);

impl IntentName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IntentValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IntentValidationError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(IntentValidationError::NameTooLong { max: NAME_MAX });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(IntentValidationError::NameWhitespace);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IntentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalogued intent with a free-text description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub id: IntentId,
    pub name: IntentName,
    pub description: String,
}
