//! Regression coverage for this module.

use super::*;
use crate::inbound::http::test_utils::{MemoryBackend, api_app};
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const PASSWORD: &str = "correct horse";

#[fixture]
fn backend() -> MemoryBackend {
    MemoryBackend::new()
}

fn cookie_named(response: &ServiceResponse, name: &str) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(Cookie::into_owned)
}

macro_rules! call {
    ($app:expr, $req:expr) => {
        actix_test::call_service(&$app, $req.to_request()).await
    };
}

fn register_request(email: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({"username": "ada", "email": email, "password": PASSWORD}))
}

fn login_request(email: &str, password: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_form(LoginForm {
            user_email: email.to_owned(),
            user_password: password.to_owned(),
        })
}

#[rstest]
#[actix_web::test]
async fn registration_then_bearer_token_unlocks_me(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;

    let registered = call!(app, register_request("Ada@Example.org"));
    assert_eq!(registered.status(), StatusCode::OK);
    let user: UserResponse = actix_test::read_body_json(registered).await;
    assert_eq!(user.email, "ada@example.org");

    let token_res = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/token")
            .set_form(TokenForm {
                username: "ada@example.org".to_owned(),
                password: PASSWORD.to_owned(),
            })
    );
    assert_eq!(token_res.status(), StatusCode::OK);
    let token: BearerTokenResponse = actix_test::read_body_json(token_res).await;
    assert_eq!(token.token_type, "bearer");

    let me_res = call!(
        app,
        actix_test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header((
                header::AUTHORIZATION,
                format!("Bearer {}", token.access_token)
            ))
    );
    assert_eq!(me_res.status(), StatusCode::OK);
    let me_body: UserResponse = actix_test::read_body_json(me_res).await;
    assert_eq!(me_body, user);
}

#[rstest]
#[actix_web::test]
async fn wrong_password_is_unauthorised(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    call!(app, register_request("ada@example.org"));

    let res = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/token")
            .set_form(TokenForm {
                username: "ada@example.org".to_owned(),
                password: "not the password".to_owned(),
            })
    );
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Incorrect username or password");
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_is_rejected(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    assert_eq!(call!(app, register_request("ada@example.org")).status(), StatusCode::OK);

    let second = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({"username": "ada2", "email": "ada@example.org", "password": PASSWORD}))
    );
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body["message"], "Email already registered");
}

#[rstest]
#[case(json!({"username": "ada", "email": "nope", "password": PASSWORD}), "email", "invalid_email")]
#[case(json!({"username": "ada", "email": "a@b.io", "password": "short"}), "password", "password_length")]
#[actix_web::test]
async fn registration_reports_invalid_fields(
    backend: MemoryBackend,
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    let res = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(payload)
    );
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn cookie_login_enables_csrf_protected_action(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    call!(app, register_request("ada@example.org"));

    let login_res = call!(app, login_request("ada@example.org", PASSWORD));
    assert_eq!(login_res.status(), StatusCode::OK);
    let access = cookie_named(&login_res, ACCESS_COOKIE).expect("token cookie");
    let refresh_cookie = cookie_named(&login_res, REFRESH_COOKIE).expect("refresh cookie");
    let session = cookie_named(&login_res, "session").expect("session cookie");
    assert_eq!(access.http_only(), Some(true));
    assert!(refresh_cookie.expires_datetime() > access.expires_datetime());
    let login_body: LoginResponse = actix_test::read_body_json(login_res).await;
    assert_eq!(login_body.message, "Login successful");

    let granted = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/protected")
            .cookie(access.clone())
            .cookie(session.clone())
            .insert_header((CSRF_HEADER, login_body.csrf_token.as_str()))
    );
    assert_eq!(granted.status(), StatusCode::OK);
    let granted_body: ProtectedResponse = actix_test::read_body_json(granted).await;
    assert_eq!(granted_body.user, "ada");

    let forged = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/protected")
            .cookie(access)
            .cookie(session)
            .insert_header((CSRF_HEADER, "forged"))
    );
    assert_eq!(forged.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn dashboard_greets_cookie_user(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    call!(app, register_request("ada@example.org"));
    let login_res = call!(app, login_request("ada@example.org", PASSWORD));
    let access = cookie_named(&login_res, ACCESS_COOKIE).expect("token cookie");

    let res = call!(
        app,
        actix_test::TestRequest::get()
            .uri("/api/v1/auth/dashboard")
            .cookie(access)
    );
    assert_eq!(res.status(), StatusCode::OK);
    let body: DashboardResponse = actix_test::read_body_json(res).await;
    assert_eq!(body.message, "Welcome ada");
}

#[rstest]
#[actix_web::test]
async fn refresh_cookie_renews_access_cookie(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    call!(app, register_request("ada@example.org"));
    let login_res = call!(app, login_request("ada@example.org", PASSWORD));
    let refresh_cookie = cookie_named(&login_res, REFRESH_COOKIE).expect("refresh cookie");

    let renewed = call!(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(refresh_cookie)
    );
    assert_eq!(renewed.status(), StatusCode::OK);
    assert!(cookie_named(&renewed, ACCESS_COOKIE).is_some());
}

#[rstest]
#[case::no_cookie(None)]
#[case::access_token_as_refresh(Some(ACCESS_COOKIE))]
#[actix_web::test]
async fn refresh_rejects_missing_or_wrong_tokens(
    backend: MemoryBackend,
    #[case] replay: Option<&str>,
) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    call!(app, register_request("ada@example.org"));
    let login_res = call!(app, login_request("ada@example.org", PASSWORD));

    let mut req = actix_test::TestRequest::post().uri("/api/v1/auth/refresh");
    if let Some(name) = replay {
        let original = cookie_named(&login_res, name).expect("issued cookie");
        req = req.cookie(Cookie::new(REFRESH_COOKIE, original.value().to_owned()));
    }
    assert_eq!(call!(app, req).status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case::anonymous(None)]
#[case::garbage_bearer(Some("Bearer not-a-jwt"))]
#[case::wrong_scheme(Some("Basic YWRhOnB3"))]
#[actix_web::test]
async fn me_requires_valid_credentials(backend: MemoryBackend, #[case] authorization: Option<&str>) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;
    let mut req = actix_test::TestRequest::get().uri("/api/v1/auth/me");
    if let Some(value) = authorization {
        req = req.insert_header((header::AUTHORIZATION, value));
    }
    assert_eq!(call!(app, req).status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn logout_expires_token_cookies(backend: MemoryBackend) {
    let app = actix_test::init_service(api_app(backend.state.clone())).await;

    let res = call!(app, actix_test::TestRequest::post().uri("/api/v1/auth/logout"));
    assert_eq!(res.status(), StatusCode::OK);
    for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
        let cookie = cookie_named(&res, name).expect("removal cookie");
        assert_eq!(cookie.value(), "");
        assert_eq!(
            cookie.max_age(),
            Some(actix_web::cookie::time::Duration::ZERO)
        );
    }
    let body: MessageResponse = actix_test::read_body_json(res).await;
    assert_eq!(body.message, "Logged out successfully");
}
