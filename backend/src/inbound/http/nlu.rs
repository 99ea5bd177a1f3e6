//! NLU training example endpoints.
//!
//! ```text
//! GET    /api/v1/nlu/examples
//! POST   /api/v1/nlu/examples         {"text","intent"}
//! PUT    /api/v1/nlu/examples         {"text","intent"}
//! DELETE /api/v1/nlu/examples?text=..
//! GET    /api/v1/nlu/validation
//! ```

use std::collections::{BTreeMap, BTreeSet};

use actix_web::{delete, get, post, put, web};
use nlu_data::SpanViolation;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::NluOverview;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::MessageResponse;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ExampleRequest {
    #[schema(example = "show me chinese restaurants")]
    pub text: String,
    #[schema(example = "restaurant_search")]
    pub intent: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ExampleQuery {
    pub text: String,
}

/// Every example text mapped to its intent, plus the distinct intents.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct OverviewResponse {
    pub examples: BTreeMap<String, String>,
    pub intents: BTreeSet<String>,
}

impl From<NluOverview> for OverviewResponse {
    fn from(overview: NluOverview) -> Self {
        Self {
            examples: overview.examples,
            intents: overview.intents,
        }
    }
}

/// Span problems found in the document.
///
/// Each violation carries `example`, `text`, `entity` and a `kind` tag with
/// kind-specific fields.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationResponse {
    #[schema(value_type = Vec<Object>)]
    pub violations: Vec<SpanViolation>,
}

#[utoipa::path(
    get,
    path = "/api/v1/nlu/examples",
    responses(
        (status = 200, description = "Examples and intents", body = OverviewResponse),
        (status = 500, description = "Example document unreadable", body = Error)
    ),
    tags = ["nlu"],
    operation_id = "listExamples"
)]
#[get("/nlu/examples")]
pub async fn list_examples(state: web::Data<HttpState>) -> ApiResult<web::Json<OverviewResponse>> {
    Ok(web::Json(state.nlu.overview().await?.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/nlu/examples",
    request_body = ExampleRequest,
    responses(
        (status = 200, description = "Example added", body = MessageResponse),
        (status = 400, description = "Blank field or duplicate text", body = Error)
    ),
    tags = ["nlu"],
    operation_id = "addExample"
)]
#[post("/nlu/examples")]
pub async fn add_example(
    state: web::Data<HttpState>,
    payload: web::Json<ExampleRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.nlu.add_example(&payload.text, &payload.intent).await?;
    Ok(web::Json(MessageResponse {
        message: "Example added".to_owned(),
    }))
}

/// Re-label an existing example.
#[utoipa::path(
    put,
    path = "/api/v1/nlu/examples",
    request_body = ExampleRequest,
    responses(
        (status = 200, description = "Intent updated", body = MessageResponse),
        (status = 400, description = "Blank field", body = Error),
        (status = 404, description = "Unknown example text", body = Error)
    ),
    tags = ["nlu"],
    operation_id = "updateExampleIntent"
)]
#[put("/nlu/examples")]
pub async fn update_example(
    state: web::Data<HttpState>,
    payload: web::Json<ExampleRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    state
        .nlu
        .update_intent(&payload.text, &payload.intent)
        .await?;
    Ok(web::Json(MessageResponse {
        message: "Example updated".to_owned(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/nlu/examples",
    params(("text" = String, Query, description = "Exact example text")),
    responses(
        (status = 200, description = "Example removed", body = MessageResponse),
        (status = 404, description = "Unknown example text", body = Error)
    ),
    tags = ["nlu"],
    operation_id = "removeExample"
)]
#[delete("/nlu/examples")]
pub async fn remove_example(
    state: web::Data<HttpState>,
    query: web::Query<ExampleQuery>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.nlu.remove_example(&query.text).await?;
    Ok(web::Json(MessageResponse {
        message: "Example removed".to_owned(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/nlu/validation",
    responses(
        (status = 200, description = "Entity span violations", body = ValidationResponse),
        (status = 500, description = "Example document unreadable", body = Error)
    ),
    tags = ["nlu"],
    operation_id = "validateExamples"
)]
#[get("/nlu/validation")]
pub async fn validate_examples(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ValidationResponse>> {
    Ok(web::Json(ValidationResponse {
        violations: state.nlu.validate().await?,
    }))
}
