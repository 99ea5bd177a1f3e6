//! Domain ports.
//!
//! Driving ports (`LoginService`, `MemberDirectory`, ...) are what inbound
//! adapters call. Driven ports (`UserRepository`, `TokenIssuer`, ...) are
//! what domain services call and outbound adapters implement.

mod macros;

mod employee_repository;
mod employee_roster;
mod intent_catalogue;
mod intent_repository;
mod login_service;
mod member_directory;
mod member_repository;
mod nlu_example_store;
mod nlu_examples;
mod password_hasher;
mod registration_service;
mod session_tokens;
mod token_issuer;
mod upload_intake;
mod upload_store;
mod user_repository;
mod users_query;

pub(crate) use macros::define_port_error;

pub use employee_repository::{EmployeePersistenceError, EmployeeRepository};
pub use employee_roster::EmployeeRoster;
pub use intent_catalogue::IntentCatalogue;
pub use intent_repository::{IntentPersistenceError, IntentRepository};
pub use login_service::LoginService;
pub use member_directory::MemberDirectory;
pub use member_repository::{MemberPersistenceError, MemberRepository};
pub use nlu_example_store::{NluExampleStore, NluStoreError};
pub use nlu_examples::{NluExamples, NluOverview};
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use registration_service::RegistrationService;
pub use session_tokens::SessionTokens;
pub use token_issuer::{TokenError, TokenIssuer};
pub use upload_intake::UploadIntake;
pub use upload_store::{TablePreviewError, TablePreviewer, UploadStore, UploadStoreError};
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_query::UsersQuery;

#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
#[cfg(test)]
pub use intent_repository::MockIntentRepository;
#[cfg(test)]
pub use member_repository::MockMemberRepository;
#[cfg(test)]
pub use nlu_example_store::MockNluExampleStore;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
#[cfg(test)]
pub use upload_store::{MockTablePreviewer, MockUploadStore};
#[cfg(test)]
pub use user_repository::MockUserRepository;
