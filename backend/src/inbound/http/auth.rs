//! Registration, login and token endpoints.
//!
//! ```text
//! POST /api/v1/auth/register  {"username","email","password"}
//! POST /api/v1/auth/login     user_email=..&user_password=..
//! POST /api/v1/auth/token     username=..&password=..
//! POST /api/v1/auth/refresh
//! GET  /api/v1/auth/me
//! GET  /api/v1/auth/dashboard
//! POST /api/v1/auth/protected
//! POST /api/v1/auth/logout
//! ```
//!
//! Identity comes from an `Authorization: Bearer` header or, failing that,
//! the HttpOnly `token` cookie set at login.

use actix_web::cookie::Cookie;
use actix_web::cookie::time::OffsetDateTime;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, get, post, web};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, IssuedToken, LoginCredentials, NewAccount, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{CookiePolicy, HttpState};
use crate::inbound::http::validation::reject_field;

pub(crate) const ACCESS_COOKIE: &str = "token";
pub(crate) const REFRESH_COOKIE: &str = "refresh_token";
pub(crate) const CSRF_HEADER: &str = "X-CSRF-Token";

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "ada@example.org")]
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Body of endpoints that only report what happened.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Cookie login form.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    pub user_email: String,
    pub user_password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub csrf_token: String,
}

/// OAuth2 password-grant form; `username` holds the account email.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BearerTokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProtectedResponse {
    pub message: String,
    pub user: String,
}

/// The user behind the request's access token.
///
/// Rejects with `401` when no token is presented or it does not verify.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req)
            .or_else(|| req.cookie(ACCESS_COOKIE).map(|c| c.value().to_owned()));
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let token = token.ok_or_else(|| Error::unauthorized("Not authenticated"))?;
            state.tokens.resolve(&token).await.map(Self)
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_owned())
}

fn token_cookie(
    name: &'static str,
    issued: &IssuedToken,
    policy: CookiePolicy,
) -> Result<Cookie<'static>, Error> {
    let expires = OffsetDateTime::from_unix_timestamp(issued.expires_at.timestamp())
        .map_err(|err| Error::internal(format!("cookie expiry out of range: {err}")))?;
    Ok(Cookie::build(name, issued.token.clone())
        .path("/")
        .http_only(true)
        .secure(policy.secure)
        .same_site(policy.same_site)
        .expires(expires)
        .finish())
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid or duplicate account", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let RegisterRequest {
        username,
        email,
        password,
    } = payload.into_inner();
    let account = NewAccount::try_from_parts(&username, &email, &password).map_err(reject_field)?;
    let user = state.registration.register(account).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Cookie login: sets `token` and `refresh_token` and returns a CSRF token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (
            status = 200,
            description = "Login success",
            headers(("Set-Cookie" = String, description = "Access, refresh and session cookies")),
            body = LoginResponse
        ),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&form.user_email, &form.user_password)
        .map_err(reject_field)?;
    let user = state.login.authenticate(&credentials).await?;
    let pair = state.tokens.issue_cookie_pair(&user)?;
    let csrf_token = session.issue_csrf_token()?;
    tracing::info!(user_id = %user.id(), "cookie login");

    Ok(HttpResponse::Ok()
        .cookie(token_cookie(ACCESS_COOKIE, &pair.access, state.cookies)?)
        .cookie(token_cookie(REFRESH_COOKIE, &pair.refresh, state.cookies)?)
        .json(LoginResponse {
            message: "Login successful".to_owned(),
            csrf_token,
        }))
}

/// OAuth2 password flow returning a bearer access token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/token",
    request_body(content = TokenForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Bearer token", body = BearerTokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["auth"],
    operation_id = "issueToken",
    security([])
)]
#[post("/auth/token")]
pub async fn issue_token(
    state: web::Data<HttpState>,
    form: web::Form<TokenForm>,
) -> ApiResult<web::Json<BearerTokenResponse>> {
    let credentials =
        LoginCredentials::try_from_parts(&form.username, &form.password).map_err(reject_field)?;
    let user = state.login.authenticate(&credentials).await?;
    let issued = state.tokens.issue_bearer(&user)?;
    Ok(web::Json(BearerTokenResponse {
        access_token: issued.token,
        token_type: "bearer".to_owned(),
    }))
}

/// Swap the `refresh_token` cookie for a fresh `token` cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    responses(
        (status = 200, description = "Access cookie renewed", body = MessageResponse),
        (status = 401, description = "Missing, expired or invalid refresh token", body = Error)
    ),
    tags = ["auth"],
    operation_id = "refreshToken",
    security([])
)]
#[post("/auth/refresh")]
pub async fn refresh(state: web::Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let presented = req
        .cookie(REFRESH_COOKIE)
        .ok_or_else(|| Error::unauthorized("Refresh token missing"))?;
    let access = state.tokens.refresh(presented.value()).await?;
    Ok(HttpResponse::Ok()
        .cookie(token_cookie(ACCESS_COOKIE, &access, state.cookies)?)
        .json(MessageResponse::new("Token refreshed")))
}

/// The authenticated account.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn me(user: AuthenticatedUser) -> web::Json<UserResponse> {
    web::Json(UserResponse::from(&user.0))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/dashboard",
    responses(
        (status = 200, description = "Greeting for the current user", body = DashboardResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["auth"],
    operation_id = "dashboard"
)]
#[get("/auth/dashboard")]
pub async fn dashboard(user: AuthenticatedUser) -> web::Json<DashboardResponse> {
    let AuthenticatedUser(user) = user;
    web::Json(DashboardResponse {
        message: format!("Welcome {}", user.username()),
        user: UserResponse::from(&user),
    })
}

/// An action guarded by both authentication and the session CSRF token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/protected",
    params(("X-CSRF-Token" = String, Header, description = "Token returned by login")),
    responses(
        (status = 200, description = "Access granted", body = ProtectedResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "CSRF token mismatch", body = Error)
    ),
    tags = ["auth"],
    operation_id = "protectedAction"
)]
#[post("/auth/protected")]
pub async fn protected(
    req: HttpRequest,
    user: AuthenticatedUser,
    session: SessionContext,
) -> ApiResult<web::Json<ProtectedResponse>> {
    let presented = req
        .headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok());
    session.require_csrf_match(presented)?;
    Ok(web::Json(ProtectedResponse {
        message: "Access granted".to_owned(),
        user: user.0.username().to_string(),
    }))
}

/// Clear the token cookies and the session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 200, description = "Logged out", body = MessageResponse)),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::Ok()
        .cookie(removal_cookie(ACCESS_COOKIE))
        .cookie(removal_cookie(REFRESH_COOKIE))
        .json(MessageResponse::new("Logged out successfully"))
}

#[cfg(test)]
mod tests;
