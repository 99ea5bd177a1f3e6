use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{EmployeePersistenceError, EmployeeRepository};
use crate::domain::{Employee, EmployeeId};

use super::POISONED;

/// Employee roster held in memory.
#[derive(Debug, Default)]
pub struct MemoryEmployeeRepository {
    employees: Mutex<Vec<Employee>>,
}

impl MemoryEmployeeRepository {
    fn with_employees<T>(
        &self,
        f: impl FnOnce(&mut Vec<Employee>) -> T,
    ) -> Result<T, EmployeePersistenceError> {
        let mut employees = self
            .employees
            .lock()
            .map_err(|_| EmployeePersistenceError::query(POISONED))?;
        Ok(f(&mut employees))
    }
}

#[async_trait]
impl EmployeeRepository for MemoryEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, EmployeePersistenceError> {
        self.with_employees(|employees| {
            let mut sorted = employees.clone();
            sorted.sort_by(|a, b| a.name.cmp(&b.name));
            sorted
        })
    }

    async fn insert_many(&self, batch: &[Employee]) -> Result<(), EmployeePersistenceError> {
        self.with_employees(|employees| employees.extend_from_slice(batch))
    }

    async fn update(&self, employee: &Employee) -> Result<bool, EmployeePersistenceError> {
        self.with_employees(|employees| {
            employees
                .iter_mut()
                .find(|stored| stored.id == employee.id)
                .map(|stored| *stored = employee.clone())
                .is_some()
        })
    }

    async fn delete_many(&self, ids: &[EmployeeId]) -> Result<u64, EmployeePersistenceError> {
        self.with_employees(|employees| {
            let before = employees.len();
            employees.retain(|employee| !ids.contains(&employee.id));
            u64::try_from(before - employees.len()).unwrap_or(u64::MAX)
        })
    }
}
