//! Intent catalogue endpoints.
//!
//! ```text
//! GET    /api/v1/intents
//! POST   /api/v1/intents          {"name","description"}
//! POST   /api/v1/intents/import
//! PUT    /api/v1/intents/{id}     {"name","description"}
//! DELETE /api/v1/intents/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Intent, IntentId, IntentName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::reject_field;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct IntentRequest {
    #[schema(example = "restaurant_search")]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IntentResponse {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<Intent> for IntentResponse {
    fn from(intent: Intent) -> Self {
        Self {
            id: intent.id.to_string(),
            name: intent.name.to_string(),
            description: intent.description,
        }
    }
}

fn parse_id(raw: &str) -> Result<IntentId, Error> {
    IntentId::new(raw).map_err(reject_field)
}

fn parse_request(payload: web::Json<IntentRequest>) -> Result<(IntentName, String), Error> {
    let IntentRequest { name, description } = payload.into_inner();
    let name = IntentName::new(name).map_err(reject_field)?;
    Ok((name, description.trim().to_owned()))
}

#[utoipa::path(
    get,
    path = "/api/v1/intents",
    responses((status = 200, description = "Catalogued intents", body = [IntentResponse])),
    tags = ["intents"],
    operation_id = "listIntents"
)]
#[get("/intents")]
pub async fn list_intents(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<IntentResponse>>> {
    let intents = state.intents.list().await?;
    Ok(web::Json(intents.into_iter().map(IntentResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/intents",
    request_body = IntentRequest,
    responses(
        (status = 200, description = "Intent created", body = IntentResponse),
        (status = 400, description = "Invalid or duplicate name", body = Error)
    ),
    tags = ["intents"],
    operation_id = "addIntent"
)]
#[post("/intents")]
pub async fn add_intent(
    state: web::Data<HttpState>,
    payload: web::Json<IntentRequest>,
) -> ApiResult<web::Json<IntentResponse>> {
    let (name, description) = parse_request(payload)?;
    Ok(web::Json(state.intents.add(name, description).await?.into()))
}

/// Catalogue every intent label used by the NLU examples that is not yet known.
#[utoipa::path(
    post,
    path = "/api/v1/intents/import",
    responses(
        (status = 200, description = "Newly catalogued intents", body = [IntentResponse]),
        (status = 500, description = "Example document unreadable", body = Error)
    ),
    tags = ["intents"],
    operation_id = "importIntents"
)]
#[post("/intents/import")]
pub async fn import_intents(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<IntentResponse>>> {
    let added = state.intents.import_from_examples().await?;
    Ok(web::Json(added.into_iter().map(IntentResponse::from).collect()))
}

#[utoipa::path(
    put,
    path = "/api/v1/intents/{id}",
    params(("id" = String, Path, description = "Intent UUID")),
    request_body = IntentRequest,
    responses(
        (status = 200, description = "Intent updated", body = IntentResponse),
        (status = 400, description = "Invalid payload or duplicate name", body = Error),
        (status = 404, description = "No such intent", body = Error)
    ),
    tags = ["intents"],
    operation_id = "updateIntent"
)]
#[put("/intents/{id}")]
pub async fn update_intent(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<IntentRequest>,
) -> ApiResult<web::Json<IntentResponse>> {
    let id = parse_id(&path)?;
    let (name, description) = parse_request(payload)?;
    Ok(web::Json(
        state.intents.update(id, name, description).await?.into(),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/intents/{id}",
    params(("id" = String, Path, description = "Intent UUID")),
    responses(
        (status = 200, description = "Intent deleted", body = MessageResponse),
        (status = 404, description = "No such intent", body = Error)
    ),
    tags = ["intents"],
    operation_id = "deleteIntent"
)]
#[delete("/intents/{id}")]
pub async fn delete_intent(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.intents.remove(parse_id(&path)?).await?;
    Ok(web::Json(MessageResponse {
        message: "Intent deleted".to_owned(),
    }))
}

#[cfg(test)]
mod tests;
