//! Employee roster service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{EmployeePersistenceError, EmployeeRepository, EmployeeRoster};
use crate::domain::{
    Employee, EmployeeDraft, EmployeeId, EmployeeValidationError, Error, default_roster,
};

/// Implements [`EmployeeRoster`] over an [`EmployeeRepository`].
#[derive(Clone)]
pub struct EmployeeService<R> {
    employees: Arc<R>,
}

impl<R> EmployeeService<R> {
    pub fn new(employees: Arc<R>) -> Self {
        Self { employees }
    }
}

fn map_employee_error(error: EmployeePersistenceError) -> Error {
    match error {
        EmployeePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("employee repository unavailable: {message}"))
        }
        EmployeePersistenceError::Query { message } => {
            Error::internal(format!("employee repository error: {message}"))
        }
    }
}

fn employee_not_found(id: EmployeeId) -> Error {
    Error::not_found(format!("No employee with id {id}"))
}

#[async_trait]
impl<R> EmployeeRoster for EmployeeService<R>
where
    R: EmployeeRepository,
{
    async fn list(&self) -> Result<Vec<Employee>, Error> {
        self.employees.list().await.map_err(map_employee_error)
    }

    async fn add(&self, draft: EmployeeDraft) -> Result<Employee, Error> {
        let employee = Employee::from_draft(EmployeeId::random(), draft);
        self.employees
            .insert_many(std::slice::from_ref(&employee))
            .await
            .map_err(map_employee_error)?;
        Ok(employee)
    }

    async fn seed_defaults(&self) -> Result<Vec<Employee>, Error> {
        let roster: Vec<Employee> = default_roster()
            .into_iter()
            .map(|draft| Employee::from_draft(EmployeeId::random(), draft))
            .collect();
        self.employees
            .insert_many(&roster)
            .await
            .map_err(map_employee_error)?;
        tracing::info!(count = roster.len(), "seeded default employees");
        Ok(roster)
    }

    async fn update(&self, id: EmployeeId, draft: EmployeeDraft) -> Result<Employee, Error> {
        let employee = Employee::from_draft(id, draft);
        if self
            .employees
            .update(&employee)
            .await
            .map_err(map_employee_error)?
        {
            Ok(employee)
        } else {
            Err(employee_not_found(id))
        }
    }

    async fn remove(&self, id: EmployeeId) -> Result<(), Error> {
        let removed = self
            .employees
            .delete_many(&[id])
            .await
            .map_err(map_employee_error)?;
        if removed == 0 {
            return Err(employee_not_found(id));
        }
        Ok(())
    }

    async fn remove_many(&self, ids: Vec<EmployeeId>) -> Result<u64, Error> {
        if ids.is_empty() {
            let err = EmployeeValidationError::NoIds;
            return Err(Error::invalid_request(err.to_string()).with_details(
                serde_json::json!({ "field": err.field(), "code": err.code() }),
            ));
        }
        self.employees
            .delete_many(&ids)
            .await
            .map_err(map_employee_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockEmployeeRepository;

    #[tokio::test]
    async fn seed_inserts_the_default_roster_in_one_batch() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_insert_many()
            .withf(|batch| batch.len() == 4)
            .times(1)
            .returning(|_| Ok(()));

        let seeded = EmployeeService::new(Arc::new(repo))
            .seed_defaults()
            .await
            .expect("seeded");
        let names: Vec<&str> = seeded.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Vishwash", "Vishesh", "Shivam", "Yash"]);
    }

    #[tokio::test]
    async fn remove_reports_unknown_ids() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_delete_many().return_once(|_| Ok(0));

        let err = EmployeeService::new(Arc::new(repo))
            .remove(EmployeeId::random())
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn remove_many_requires_ids() {
        let err = EmployeeService::new(Arc::new(MockEmployeeRepository::new()))
            .remove_many(Vec::new())
            .await
            .expect_err("no ids");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn remove_many_returns_repository_count() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_delete_many()
            .withf(|ids| ids.len() == 3)
            .return_once(|_| Ok(2));

        let ids = vec![EmployeeId::random(), EmployeeId::random(), EmployeeId::random()];
        let removed = EmployeeService::new(Arc::new(repo))
            .remove_many(ids)
            .await
            .expect("removed");
        assert_eq!(removed, 2);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_update().return_once(|_| Ok(false));

        let draft = EmployeeDraft::try_new("Yash", false, "ECE", 10_000).expect("draft");
        let err = EmployeeService::new(Arc::new(repo))
            .update(EmployeeId::random(), draft)
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
