//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod employees;
pub mod error;
pub mod health;
pub mod intents;
pub mod members;
pub mod misc;
pub mod nlu;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod uploads;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` endpoint and the extractor configs they rely on.
///
/// The caller supplies the scope, the session middleware and
/// `web::Data<HttpState>`.
pub fn api_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::form_config())
        .app_data(validation::query_config())
        .app_data(web::PayloadConfig::new(uploads::UPLOAD_LIMIT_BYTES))
        .service(auth::register)
        .service(auth::login)
        .service(auth::issue_token)
        .service(auth::refresh)
        .service(auth::me)
        .service(auth::dashboard)
        .service(auth::protected)
        .service(auth::logout)
        .service(users::list_users)
        .service(members::add_member)
        .service(members::list_members)
        .service(members::get_member)
        .service(members::update_member)
        .service(members::delete_member)
        .service(employees::list_employees)
        .service(employees::add_employee)
        .service(employees::seed_employees)
        .service(employees::delete_many_employees)
        .service(employees::update_employee)
        .service(employees::delete_employee)
        .service(intents::list_intents)
        .service(intents::add_intent)
        .service(intents::import_intents)
        .service(intents::update_intent)
        .service(intents::delete_intent)
        .service(nlu::list_examples)
        .service(nlu::add_example)
        .service(nlu::update_example)
        .service(nlu::remove_example)
        .service(nlu::validate_examples)
        .service(uploads::upload_file);
}
