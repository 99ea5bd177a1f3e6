//! Regression coverage for this module.

use super::*;
use crate::inbound::http::test_utils::{MemoryBackend, api_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

fn create(name: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/intents")
        .set_json(json!({"name": name, "description": "something"}))
}

#[actix_web::test]
async fn intent_names_are_unique() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(api_app(backend.state.clone())).await;

    let first = actix_test::call_service(&app, create("greet").to_request()).await;
    assert_eq!(first.status(), StatusCode::OK);
    let second = actix_test::call_service(&app, create("greet").to_request()).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body["message"], "Intent already exists");
}

#[actix_web::test]
async fn renaming_unknown_intent_to_taken_name_is_not_found() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    actix_test::call_service(&app, create("greet").to_request()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/intents/{}", uuid::Uuid::new_v4()))
            .set_json(json!({"name": "greet", "description": "again"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn intents_can_be_renamed_and_deleted() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    let created: IntentResponse =
        actix_test::call_and_read_body_json(&app, create("greet").to_request()).await;
    let uri = format!("/api/v1/intents/{}", created.id);

    let renamed: IntentResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"name": "salute", "description": "say hello"}))
            .to_request(),
    )
    .await;
    assert_eq!(renamed.name, "salute");
    assert_eq!(renamed.id, created.id);

    let deleted =
        actix_test::call_service(&app, actix_test::TestRequest::delete().uri(&uri).to_request())
            .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let missing =
        actix_test::call_service(&app, actix_test::TestRequest::delete().uri(&uri).to_request())
            .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn import_catalogues_labels_from_examples() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    for (text, intent) in [("hi", "greet"), ("bye", "goodbye")] {
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/nlu/examples")
            .set_json(json!({"text": text, "intent": intent}))
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::OK);
    }
    actix_test::call_service(&app, create("greet").to_request()).await;

    let imported: Vec<IntentResponse> = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/intents/import")
            .to_request(),
    )
    .await;
    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].name, "goodbye");
    assert_eq!(imported[0].description, "goodbye");
}

#[actix_web::test]
async fn malformed_ids_are_rejected() {
    let backend = MemoryBackend::new();
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/intents/not-a-uuid")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
