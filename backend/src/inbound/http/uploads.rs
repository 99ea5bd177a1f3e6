//! File upload endpoint.
//!
//! ```text
//! POST /api/v1/uploads?fileName=report.pdf
//! Content-Type: application/pdf
//! <raw file bytes>
//! ```

use std::collections::BTreeMap;

use actix_web::http::header;
use actix_web::{HttpRequest, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Upload, UploadReceipt};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::reject_field;

/// Largest accepted upload body.
pub const UPLOAD_LIMIT_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    pub file_name: String,
}

/// What was stored and, depending on the type, a size or a preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub file_name: String,
    pub content_type: String,
    #[schema(example = "pdf_files/report.pdf")]
    pub file_path: String,
    /// PDF only: size in MiB rounded to two decimals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_mb: Option<f64>,
    /// CSV only: header names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    /// CSV only: the first rows keyed by column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rows: Option<Vec<BTreeMap<String, String>>>,
}

impl From<UploadReceipt> for UploadResponse {
    fn from(receipt: UploadReceipt) -> Self {
        match receipt {
            UploadReceipt::Document {
                file_name,
                content_type,
                file_path,
                size_mb,
            } => Self {
                file_name,
                content_type,
                file_path,
                size_mb: Some(size_mb),
                columns: None,
                sample_rows: None,
            },
            UploadReceipt::Table {
                file_name,
                content_type,
                file_path,
                preview,
            } => Self {
                file_name,
                content_type,
                file_path,
                size_mb: None,
                columns: Some(preview.columns),
                sample_rows: Some(preview.rows),
            },
            UploadReceipt::Stored {
                file_name,
                content_type,
                file_path,
            } => Self {
                file_name,
                content_type,
                file_path,
                size_mb: None,
                columns: None,
                sample_rows: None,
            },
        }
    }
}

/// Store a file under the directory for its content type.
#[utoipa::path(
    post,
    path = "/api/v1/uploads",
    params(("fileName" = String, Query, description = "Name to store the file under")),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Disallowed type, bad name, empty body or unreadable CSV", body = Error),
        (status = 413, description = "Body too large"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["uploads"],
    operation_id = "uploadFile"
)]
#[post("/uploads")]
pub async fn upload_file(
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> ApiResult<web::Json<UploadResponse>> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let upload =
        Upload::try_new(&query.file_name, content_type, body.to_vec()).map_err(reject_field)?;
    let receipt = state.uploads.accept(upload).await?;
    Ok(web::Json(receipt.into()))
}

#[cfg(test)]
mod tests;
