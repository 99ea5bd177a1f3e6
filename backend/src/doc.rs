//! OpenAPI document served by Swagger UI in debug builds.
//!
//! Protected endpoints accept either a bearer token or the `token` cookie;
//! both schemes are registered and applied globally. Public endpoints opt
//! out with `security([])`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::{
    auth, employees, health, intents, members, misc, nlu, uploads, users,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token from POST /api/v1/auth/token."))
                    .build(),
            ),
        );
        components.add_security_scheme(
            "TokenCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                auth::ACCESS_COOKIE,
                "Access token cookie set by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "crudhub API",
        description = "Accounts, a members directory, an employee roster, intents, NLU training data and file uploads."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("BearerAuth" = []), ("TokenCookie" = [])),
    paths(
        misc::ping,
        misc::smoke_test,
        health::ready,
        health::live,
        auth::register,
        auth::login,
        auth::issue_token,
        auth::refresh,
        auth::me,
        auth::dashboard,
        auth::protected,
        auth::logout,
        users::list_users,
        members::add_member,
        members::list_members,
        members::get_member,
        members::update_member,
        members::delete_member,
        employees::list_employees,
        employees::add_employee,
        employees::seed_employees,
        employees::delete_many_employees,
        employees::update_employee,
        employees::delete_employee,
        intents::list_intents,
        intents::add_intent,
        intents::import_intents,
        intents::update_intent,
        intents::delete_intent,
        nlu::list_examples,
        nlu::add_example,
        nlu::update_example,
        nlu::remove_example,
        nlu::validate_examples,
        uploads::upload_file,
    ),
    components(schemas(
        Error,
        ErrorCode,
        misc::PingResponse,
        misc::SmokeResponse,
        auth::UserResponse,
        auth::MessageResponse,
        auth::RegisterRequest,
        auth::LoginForm,
        auth::LoginResponse,
        auth::TokenForm,
        auth::BearerTokenResponse,
        auth::DashboardResponse,
        auth::ProtectedResponse,
        members::MemberRequest,
        members::MemberResponse,
        members::MemberCreatedResponse,
        members::MemberListResponse,
        employees::EmployeeRequest,
        employees::EmployeeResponse,
        employees::DeleteManyRequest,
        employees::DeleteManyResponse,
        intents::IntentRequest,
        intents::IntentResponse,
        nlu::ExampleRequest,
        nlu::OverviewResponse,
        nlu::ValidationResponse,
        uploads::UploadResponse,
    )),
    tags(
        (name = "misc", description = "Connectivity checks"),
        (name = "health", description = "Liveness and readiness probes"),
        (name = "auth", description = "Registration, login and tokens"),
        (name = "users", description = "Registered accounts"),
        (name = "members", description = "Members directory"),
        (name = "employees", description = "Employee roster"),
        (name = "intents", description = "Intent catalogue"),
        (name = "nlu", description = "NLU training examples"),
        (name = "uploads", description = "File uploads")
    )
)]
pub struct ApiDoc;
