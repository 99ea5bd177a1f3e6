//! Employee roster records.

use std::fmt;

use uuid::Uuid;

/// Validation failures for employee payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmployeeValidationError {
    #[error("employee id must be a valid UUID")]
    InvalidId,
    #[error("name must not be empty")]
    EmptyName,
    #[error("address must not be empty")]
    EmptyAddress,
    #[error("salary must not be negative")]
    NegativeSalary,
    #[error("at least one employee id is required")]
    NoIds,
}

impl EmployeeValidationError {
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyName => "name",
            Self::EmptyAddress => "address",
            Self::NegativeSalary => "salary",
            Self::NoIds => "ids",
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyName => "empty_name",
            Self::EmptyAddress => "empty_address",
            Self::NegativeSalary => "negative_salary",
            Self::NoIds => "no_ids",
        }
    }
}

/// Employee identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmployeeValidationError> {
        Uuid::parse_str(raw.as_ref().trim())
            .map(Self)
            .map_err(|_| EmployeeValidationError::InvalidId)
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

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated employee fields without an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub gf: bool,
    pub address: String,
    pub salary: i64,
}

impl EmployeeDraft {
    pub fn try_new(
        name: &str,
        gf: bool,
        address: &str,
        salary: i64,
    ) -> Result<Self, EmployeeValidationError> {
        let trimmed_name = name.trim();
        if trimmed_name.is_empty() {
            return Err(EmployeeValidationError::EmptyName);
        }
        let trimmed_address = address.trim();
        if trimmed_address.is_empty() {
            return Err(EmployeeValidationError::EmptyAddress);
        }
        if salary < 0 {
            return Err(EmployeeValidationError::NegativeSalary);
        }
        Ok(Self {
            name: trimmed_name.to_owned(),
            gf,
            address: trimmed_address.to_owned(),
            salary,
        })
    }
}

/// A stored employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub gf: bool,
    pub address: String,
    pub salary: i64,
}

impl Employee {
    #[must_use]
    pub fn from_draft(id: EmployeeId, draft: EmployeeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            gf: draft.gf,
            address: draft.address,
            salary: draft.salary,
        }
    }
}

/// The four sample employees inserted by the bulk seed operation.
#[must_use]
pub fn default_roster() -> Vec<EmployeeDraft> {
    [
        ("Vishwash", "CSE"),
        ("Vishesh", "IT"),
        ("Shivam", "ME"),
        ("Yash", "ECE"),
    ]
    .into_iter()
    .map(|(name, address)| EmployeeDraft {
        name: name.to_owned(),
        gf: false,
        address: address.to_owned(),
        salary: 10_000,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "CSE", 1, EmployeeValidationError::EmptyName)]
    #[case("Yash", "  ", 1, EmployeeValidationError::EmptyAddress)]
    #[case("Yash", "ECE", -1, EmployeeValidationError::NegativeSalary)]
    fn draft_rejects_invalid_fields(
        #[case] name: &str,
        #[case] address: &str,
        #[case] salary: i64,
        #[case] expected: EmployeeValidationError,
    ) {
        assert_eq!(EmployeeDraft::try_new(name, false, address, salary), Err(expected));
    }

    #[rstest]
    fn default_roster_matches_fixture_set() {
        let roster = default_roster();
        let names: Vec<&str> = roster.iter().map(|draft| draft.name.as_str()).collect();
        assert_eq!(names, ["Vishwash", "Vishesh", "Shivam", "Yash"]);
        assert!(roster.iter().all(|draft| !draft.gf && draft.salary == 10_000));
    }

    #[rstest]
    fn employee_id_parses_uuid_text() {
        let id = EmployeeId::random();
        assert_eq!(EmployeeId::new(id.to_string()), Ok(id));
        assert_eq!(
            EmployeeId::new("42"),
            Err(EmployeeValidationError::InvalidId)
        );
    }
}
