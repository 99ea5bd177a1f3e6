//! Driving port for the employee roster.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeDraft, EmployeeId, Error};

#[async_trait]
pub trait EmployeeRoster: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>, Error>;

    async fn add(&self, draft: EmployeeDraft) -> Result<Employee, Error>;

    /// Insert the four sample employees and return them.
    async fn seed_defaults(&self) -> Result<Vec<Employee>, Error>;

    async fn update(&self, id: EmployeeId, draft: EmployeeDraft) -> Result<Employee, Error>;

    /// Delete one employee; `NotFound` when the id is unknown.
    async fn remove(&self, id: EmployeeId) -> Result<(), Error>;

    /// Delete several employees and return the number removed.
    async fn remove_many(&self, ids: Vec<EmployeeId>) -> Result<u64, Error>;
}
