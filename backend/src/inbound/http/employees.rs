//! Employee roster endpoints.
//!
//! ```text
//! GET    /api/v1/employees
//! POST   /api/v1/employees              {"name","gf","address","salary"}
//! POST   /api/v1/employees/seed
//! POST   /api/v1/employees/delete_many  {"ids":[..]}
//! PUT    /api/v1/employees/{id}
//! DELETE /api/v1/employees/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Employee, EmployeeDraft, EmployeeId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::reject_field;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EmployeeRequest {
    #[schema(example = "Yash")]
    pub name: String,
    #[serde(default)]
    pub gf: bool,
    #[schema(example = "ECE")]
    pub address: String,
    #[schema(example = 10000)]
    pub salary: i64,
}

impl EmployeeRequest {
    fn into_draft(self) -> Result<EmployeeDraft, Error> {
        EmployeeDraft::try_new(&self.name, self.gf, &self.address, self.salary)
            .map_err(reject_field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub gf: bool,
    pub address: String,
    pub salary: i64,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.to_string(),
            name: employee.name,
            gf: employee.gf,
            address: employee.address,
            salary: employee.salary,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteManyRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteManyResponse {
    pub deleted: u64,
}

fn to_responses(employees: Vec<Employee>) -> Vec<EmployeeResponse> {
    employees.into_iter().map(EmployeeResponse::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses((status = 200, description = "Every employee", body = [EmployeeResponse])),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<EmployeeResponse>>> {
    Ok(web::Json(to_responses(state.employees.list().await?)))
}

#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Invalid payload", body = Error)
    ),
    tags = ["employees"],
    operation_id = "addEmployee"
)]
#[post("/employees")]
pub async fn add_employee(
    state: web::Data<HttpState>,
    payload: web::Json<EmployeeRequest>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    let draft = payload.into_inner().into_draft()?;
    Ok(web::Json(state.employees.add(draft).await?.into()))
}

/// Insert the four sample employees.
#[utoipa::path(
    post,
    path = "/api/v1/employees/seed",
    responses((status = 200, description = "Seeded employees", body = [EmployeeResponse])),
    tags = ["employees"],
    operation_id = "seedEmployees"
)]
#[post("/employees/seed")]
pub async fn seed_employees(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<EmployeeResponse>>> {
    Ok(web::Json(to_responses(state.employees.seed_defaults().await?)))
}

#[utoipa::path(
    post,
    path = "/api/v1/employees/delete_many",
    request_body = DeleteManyRequest,
    responses(
        (status = 200, description = "Number of employees removed", body = DeleteManyResponse),
        (status = 400, description = "Empty or malformed id list", body = Error)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployees"
)]
#[post("/employees/delete_many")]
pub async fn delete_many_employees(
    state: web::Data<HttpState>,
    payload: web::Json<DeleteManyRequest>,
) -> ApiResult<web::Json<DeleteManyResponse>> {
    let ids = payload
        .into_inner()
        .ids
        .iter()
        .map(EmployeeId::new)
        .collect::<Result<Vec<_>, _>>()
        .map_err(reject_field)?;
    let deleted = state.employees.remove_many(ids).await?;
    Ok(web::Json(DeleteManyResponse { deleted }))
}

#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee UUID")),
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Invalid payload or id", body = Error),
        (status = 404, description = "No such employee", body = Error)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/employees/{id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<EmployeeRequest>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    let id = EmployeeId::new(path.as_str()).map_err(reject_field)?;
    let draft = payload.into_inner().into_draft()?;
    Ok(web::Json(state.employees.update(id, draft).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee UUID")),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "No such employee", body = Error)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/employees/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = EmployeeId::new(path.as_str()).map_err(reject_field)?;
    state.employees.remove(id).await?;
    Ok(web::Json(MessageResponse {
        message: "Employee deleted".to_owned(),
    }))
}
