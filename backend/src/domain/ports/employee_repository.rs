//! Port abstraction for employee roster storage.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by employee repository adapters.
    pub enum EmployeePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "employee repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "employee repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All employees ordered by name.
    async fn list(&self) -> Result<Vec<Employee>, EmployeePersistenceError>;

    /// Insert every employee in one batch.
    async fn insert_many(&self, employees: &[Employee]) -> Result<(), EmployeePersistenceError>;

    /// Overwrite an employee; `false` when the id is unknown.
    async fn update(&self, employee: &Employee) -> Result<bool, EmployeePersistenceError>;

    /// Delete the listed ids and return how many existed.
    async fn delete_many(&self, ids: &[EmployeeId]) -> Result<u64, EmployeePersistenceError>;
}
