//! Members directory endpoints.
//!
//! ```text
//! POST   /api/v1/add_user      {"name","email"}
//! GET    /api/v1/check
//! GET    /api/v1/user/{id}
//! PUT    /api/v1/user/{id}     {"name","email"}
//! DELETE /api/v1/user/{email}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{EmailAddress, Error, Member, MemberDraft, MemberId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::reject_field;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MemberRequest {
    #[schema(example = "John")]
    pub name: String,
    #[schema(example = "john@example.org")]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.value(),
            name: member.name,
            email: member.email.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberCreatedResponse {
    #[schema(example = "usercreated")]
    pub msg: String,
    pub user: MemberResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberListResponse {
    pub user_detail: Vec<MemberResponse>,
}

fn parse_draft(payload: web::Json<MemberRequest>) -> Result<MemberDraft, Error> {
    MemberDraft::try_from_parts(&payload.name, &payload.email).map_err(reject_field)
}

fn parse_member_id(raw: &str) -> Result<MemberId, Error> {
    raw.trim().parse::<i32>().map(MemberId::new).map_err(|_| {
        Error::invalid_request("member id must be an integer")
            .with_details(json!({"field": "id", "code": "invalid_id"}))
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/add_user",
    request_body = MemberRequest,
    responses(
        (status = 200, description = "Member created", body = MemberCreatedResponse),
        (status = 400, description = "Invalid payload or duplicate email", body = Error)
    ),
    tags = ["members"],
    operation_id = "addMember"
)]
#[post("/add_user")]
pub async fn add_member(
    state: web::Data<HttpState>,
    payload: web::Json<MemberRequest>,
) -> ApiResult<web::Json<MemberCreatedResponse>> {
    let member = state.members.add(parse_draft(payload)?).await?;
    Ok(web::Json(MemberCreatedResponse {
        msg: "usercreated".to_owned(),
        user: member.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/check",
    responses(
        (status = 200, description = "All members", body = MemberListResponse),
        (status = 404, description = "Directory is empty", body = Error)
    ),
    tags = ["members"],
    operation_id = "listMembers"
)]
#[get("/check")]
pub async fn list_members(state: web::Data<HttpState>) -> ApiResult<web::Json<MemberListResponse>> {
    let members = state.members.list().await?;
    Ok(web::Json(MemberListResponse {
        user_detail: members.into_iter().map(MemberResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/user/{id}",
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member", body = MemberResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "No such member", body = Error)
    ),
    tags = ["members"],
    operation_id = "getMember"
)]
#[get("/user/{id}")]
pub async fn get_member(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MemberResponse>> {
    let id = parse_member_id(&path)?;
    Ok(web::Json(state.members.get(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/user/{id}",
    params(("id" = i32, Path, description = "Member id")),
    request_body = MemberRequest,
    responses(
        (status = 200, description = "Member updated", body = MessageResponse),
        (status = 400, description = "Invalid payload or duplicate email", body = Error),
        (status = 404, description = "No such member", body = Error)
    ),
    tags = ["members"],
    operation_id = "updateMember"
)]
#[put("/user/{id}")]
pub async fn update_member(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<MemberRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_member_id(&path)?;
    state.members.update(id, parse_draft(payload)?).await?;
    Ok(web::Json(MessageResponse {
        message: "User updated".to_owned(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/user/{email}",
    params(("email" = String, Path, description = "Member email")),
    responses(
        (status = 200, description = "Member deleted", body = MessageResponse),
        (status = 400, description = "Malformed email", body = Error),
        (status = 404, description = "No such member", body = Error)
    ),
    tags = ["members"],
    operation_id = "deleteMember"
)]
#[delete("/user/{email}")]
pub async fn delete_member(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let email = EmailAddress::new(path.as_str()).map_err(reject_field)?;
    state.members.remove_by_email(&email).await?;
    Ok(web::Json(MessageResponse {
        message: "User deleted".to_owned(),
    }))
}

#[cfg(test)]
mod tests;
