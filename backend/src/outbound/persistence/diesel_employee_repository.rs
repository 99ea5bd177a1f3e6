//! PostgreSQL-backed `EmployeeRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{EmployeePersistenceError, EmployeeRepository};
use crate::domain::{Employee, EmployeeId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{EmployeeChanges, EmployeeRow};
use super::pool::{DbPool, PoolError};
use super::schema::employees;

#[derive(Clone)]
pub struct DieselEmployeeRepository {
    pool: DbPool,
}

impl DieselEmployeeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> EmployeePersistenceError {
    map_pool_error(error, EmployeePersistenceError::connection)
}

fn diesel_error(error: DieselError) -> EmployeePersistenceError {
    map_diesel_error(
        error,
        |message| EmployeePersistenceError::query(message),
        |message| EmployeePersistenceError::connection(message),
    )
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: EmployeeId::from_uuid(row.id),
            name: row.name,
            gf: row.gf,
            address: row.address,
            salary: row.salary,
        }
    }
}

impl From<&Employee> for EmployeeRow {
    fn from(employee: &Employee) -> Self {
        Self {
            id: *employee.id.as_uuid(),
            name: employee.name.clone(),
            gf: employee.gf,
            address: employee.address.clone(),
            salary: employee.salary,
        }
    }
}

#[async_trait]
impl EmployeeRepository for DieselEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, EmployeePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<EmployeeRow> = employees::table
            .order((employees::name.asc(), employees::id.asc()))
            .select(EmployeeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn insert_many(&self, batch: &[Employee]) -> Result<(), EmployeePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<EmployeeRow> = batch.iter().map(EmployeeRow::from).collect();
        diesel::insert_into(employees::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn update(&self, employee: &Employee) -> Result<bool, EmployeePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(employees::table.find(*employee.id.as_uuid()))
            .set(&EmployeeChanges {
                name: &employee.name,
                gf: employee.gf,
                address: &employee.address,
                salary: employee.salary,
            })
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete_many(&self, ids: &[EmployeeId]) -> Result<u64, EmployeePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let deleted = diesel::delete(employees::table.filter(employees::id.eq_any(uuids)))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(u64::try_from(deleted).unwrap_or(u64::MAX))
    }
}
