//! Connectivity checks outside `/api/v1`.
//!
//! ```text
//! GET /ping  -> {"ping":"pong!"}
//! GET /test  -> {"msg":"Testing fine"}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    #[schema(example = "pong!")]
    pub ping: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SmokeResponse {
    #[schema(example = "Testing fine")]
    pub msg: String,
}

#[utoipa::path(
    get,
    path = "/ping",
    responses((status = 200, description = "Server is reachable", body = PingResponse)),
    tags = ["misc"],
    security([])
)]
#[get("/ping")]
pub async fn ping() -> web::Json<PingResponse> {
    web::Json(PingResponse {
        ping: "pong!".to_owned(),
    })
}

#[utoipa::path(
    get,
    path = "/test",
    responses((status = 200, description = "Smoke test", body = SmokeResponse)),
    tags = ["misc"],
    security([])
)]
#[get("/test")]
pub async fn smoke_test() -> web::Json<SmokeResponse> {
    web::Json(SmokeResponse {
        msg: "Testing fine".to_owned(),
    })
}
