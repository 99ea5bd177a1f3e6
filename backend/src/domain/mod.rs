//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence layers, and the services that enforce their rules. Adapters
//! talk to the domain only through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: the single failure shape every operation returns.
//! - User, Member, Employee, Intent, Upload: validated records.
//! - AccountService, TokenAuthority, MemberService, EmployeeService,
//!   IntentService, NluService, UploadService: driving-port implementations.

pub mod auth;
pub mod employee;
pub mod error;
pub mod intent;
pub mod member;
pub mod ports;
pub mod tokens;
pub mod trace_id;
pub mod upload;
pub mod user;

mod account_service;
mod employee_service;
mod intent_service;
mod member_service;
mod nlu_service;
mod token_authority;
mod upload_service;

pub use self::account_service::AccountService;
#[cfg(test)]
pub(crate) use self::account_service::UNKNOWN_ACCOUNT_HASH;
pub use self::auth::{CredentialsValidationError, LoginCredentials, NewAccount, Password};
pub use self::employee::{
    Employee, EmployeeDraft, EmployeeId, EmployeeValidationError, default_roster,
};
pub use self::employee_service::EmployeeService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::intent::{Intent, IntentId, IntentName, IntentValidationError};
pub use self::intent_service::IntentService;
pub use self::member::{Member, MemberDraft, MemberId, MemberValidationError};
pub use self::member_service::MemberService;
pub use self::nlu_service::NluService;
pub use self::token_authority::TokenAuthority;
pub use self::tokens::{IssuedToken, TokenClaims, TokenKind, TokenLifetimes, TokenPair};
pub use self::trace_id::TraceId;
pub use self::upload::{
    PREVIEW_ROWS, TablePreview, Upload, UploadFileName, UploadKind, UploadReceipt,
    UploadValidationError, size_in_megabytes,
};
pub use self::upload_service::UploadService;
pub use self::user::{
    EmailAddress, PasswordHash, User, UserAccount, UserId, UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use crudhub::domain::{ApiResult, Error, ErrorCode};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::forbidden("nope"))
/// }
/// assert_eq!(lookup().map_err(|e| e.code()), Err(ErrorCode::Forbidden));
/// ```
pub type ApiResult<T> = Result<T, Error>;
