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

fn add_request(name: &str, email: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/add_user")
        .set_json(json!({"name": name, "email": email}))
}

#[rstest]
#[actix_web::test]
async fn adding_same_email_twice_is_rejected(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;

    let first =
        actix_test::call_service(&app, add_request("John", "21ohn@gmail.com").to_request()).await;
    assert_eq!(first.status(), StatusCode::OK);
    let created: MemberCreatedResponse = actix_test::read_body_json(first).await;
    assert_eq!(created.msg, "usercreated");
    assert_eq!(created.user.email, "21ohn@gmail.com");

    let second =
        actix_test::call_service(&app, add_request("Johnny", "21ohn@gmail.com").to_request())
            .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body["message"], "Member already exists");
}

#[rstest]
#[actix_web::test]
async fn updating_unknown_id_with_taken_email_is_not_found(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    actix_test::call_service(&app, add_request("Jane", "taken@example.org").to_request()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/user/999")
            .set_json(json!({"name": "Ghost", "email": "taken@example.org"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn empty_directory_is_not_found(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/check").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn members_round_trip_through_crud_endpoints(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    let created: MemberCreatedResponse = actix_test::call_and_read_body_json(
        &app,
        add_request("John", "john@example.org").to_request(),
    )
    .await;
    let id = created.user.id;

    let update = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/user/{id}"))
        .set_json(json!({"name": "Jonathan", "email": "jon@example.org"}))
        .to_request();
    let updated: MessageResponse = actix_test::call_and_read_body_json(&app, update).await;
    assert_eq!(updated.message, "User updated");

    let fetched: MemberResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/user/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(
        fetched,
        MemberResponse {
            id,
            name: "Jonathan".to_owned(),
            email: "jon@example.org".to_owned(),
        }
    );

    let listed: MemberListResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/check").to_request(),
    )
    .await;
    assert_eq!(listed.user_detail, vec![fetched]);

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/user/jon@example.org")
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let gone = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/user/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case::unknown_id(actix_test::TestRequest::get().uri("/api/v1/user/999"), StatusCode::NOT_FOUND)]
#[case::malformed_id(actix_test::TestRequest::get().uri("/api/v1/user/abc"), StatusCode::BAD_REQUEST)]
#[case::unknown_email(
    actix_test::TestRequest::delete().uri("/api/v1/user/ghost@example.org"),
    StatusCode::NOT_FOUND
)]
#[case::invalid_payload(
    actix_test::TestRequest::post()
        .uri("/api/v1/add_user")
        .set_json(json!({"name": "", "email": "a@b.io"})),
    StatusCode::BAD_REQUEST
)]
#[case::malformed_json(
    actix_test::TestRequest::post()
        .uri("/api/v1/add_user")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{"),
    StatusCode::BAD_REQUEST
)]
#[actix_web::test]
async fn rejects_bad_requests(
    backend: MemoryBackend,
    #[case] request: actix_test::TestRequest,
    #[case] expected: StatusCode,
) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    let res = actix_test::call_service(&app, request.to_request()).await;
    assert_eq!(res.status(), expected);
    let body: Value = actix_test::read_body_json(res).await;
    assert!(body.get("code").is_some(), "error envelope expected: {body}");
}
