//! Turning request validation failures into `400` envelopes.

use actix_web::error::{JsonPayloadError, QueryPayloadError, UrlencodedError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{
    CredentialsValidationError, EmployeeValidationError, Error, IntentValidationError,
    MemberValidationError, UploadValidationError, UserValidationError,
};

/// Validation errors that know which request field they concern.
pub(crate) trait FieldRejection: std::fmt::Display {
    fn field(&self) -> &'static str;
    fn code(&self) -> &'static str;
}

macro_rules! field_rejection {
    ($($ty:ty),+ $(,)?) => {
        $(impl FieldRejection for $ty {
            fn field(&self) -> &'static str {
                <$ty>::field(self)
            }

            fn code(&self) -> &'static str {
                <$ty>::code(self)
            }
        })+
    };
}

field_rejection!(
    CredentialsValidationError,
    EmployeeValidationError,
    IntentValidationError,
    MemberValidationError,
    UploadValidationError,
    UserValidationError,
);

/// Map a field-level validation failure onto `invalid_request` with details.
pub(crate) fn reject_field<E: FieldRejection>(err: E) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

fn malformed_body(kind: &str, err: &dyn std::fmt::Display) -> Error {
    Error::invalid_request(format!("malformed {kind}")).with_details(json!({
        "code": "malformed_body",
        "reason": err.to_string(),
    }))
}

/// JSON extractor config whose failures use the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        malformed_body("JSON body", &err).into()
    })
}

/// Form extractor config whose failures use the error envelope.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err: UrlencodedError, _req: &HttpRequest| {
        malformed_body("form body", &err).into()
    })
}

/// Query extractor config whose failures use the error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        malformed_body("query string", &err).into()
    })
}
