//! Regression coverage for this module.

use super::*;
use crate::inbound::http::test_utils::{MemoryBackend, api_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::Value;

#[fixture]
fn backend() -> MemoryBackend {
    MemoryBackend::new()
}

fn upload(file_name: &str, content_type: &str, body: &'static [u8]) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri(&format!("/api/v1/uploads?fileName={file_name}"))
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
}

#[rstest]
#[actix_web::test]
async fn csv_uploads_return_a_preview(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    let body: &'static [u8] = b"name,city\nAda,London\nGrace,Arlington\n";

    let receipt: UploadResponse = actix_test::call_and_read_body_json(
        &app,
        upload("people.csv", "text/csv", body).to_request(),
    )
    .await;

    assert_eq!(receipt.file_path, "csv_files/people.csv");
    assert_eq!(receipt.columns, Some(vec!["name".to_owned(), "city".to_owned()]));
    let rows = receipt.sample_rows.expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["city"], "London");
    assert_eq!(
        std::fs::read(backend.path("uploads/csv_files/people.csv")).expect("stored"),
        body
    );
}

#[rstest]
#[actix_web::test]
async fn pdf_uploads_report_size(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;

    let receipt: UploadResponse = actix_test::call_and_read_body_json(
        &app,
        upload("report.pdf", "application/pdf", b"%PDF-1.7").to_request(),
    )
    .await;

    assert_eq!(receipt.file_path, "pdf_files/report.pdf");
    assert_eq!(receipt.size_mb, Some(0.0));
    assert!(receipt.columns.is_none());
}

#[rstest]
#[actix_web::test]
async fn image_uploads_land_in_image_directory(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;

    let receipt: UploadResponse = actix_test::call_and_read_body_json(
        &app,
        upload("cat.png", "image/png", b"\x89PNG").to_request(),
    )
    .await;

    assert_eq!(receipt.file_path, "image_files/cat.png");
    assert!(backend.path("uploads/image_files/cat.png").exists());
}

#[rstest]
#[case::disallowed_type("a.zip", "application/zip", b"PK".as_slice(), "unsupported_type")]
#[case::traversal("..%2Fsecret.pdf", "application/pdf", b"%PDF".as_slice(), "invalid_file_name")]
#[case::hidden(".env", "text/csv", b"a,b".as_slice(), "invalid_file_name")]
#[case::empty_body("a.pdf", "application/pdf", b"".as_slice(), "empty_body")]
#[actix_web::test]
async fn invalid_uploads_are_rejected(
    backend: MemoryBackend,
    #[case] file_name: &str,
    #[case] content_type: &str,
    #[case] body: &'static [u8],
    #[case] code: &str,
) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;

    let res =
        actix_test::call_service(&app, upload(file_name, content_type, body).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(res).await;
    assert_eq!(payload["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn unparsable_csv_is_stored_but_rejected(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;

    let res = actix_test::call_service(
        &app,
        upload("broken.csv", "text/csv", b"a,b\n1,2\n3\n").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(res).await;
    assert_eq!(payload["message"], "Could not parse CSV");
    assert!(backend.path("uploads/csv_files/broken.csv").exists());
}
