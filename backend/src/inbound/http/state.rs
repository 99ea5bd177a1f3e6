//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and see nothing but driving
//! ports, so they stay testable without a database or file system.

use std::sync::Arc;

use actix_web::cookie::SameSite;

use crate::domain::ports::{
    EmployeeRoster, IntentCatalogue, LoginService, MemberDirectory, NluExamples,
    RegistrationService, SessionTokens, UploadIntake, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub users: Arc<dyn UsersQuery>,
    pub tokens: Arc<dyn SessionTokens>,
    pub members: Arc<dyn MemberDirectory>,
    pub employees: Arc<dyn EmployeeRoster>,
    pub intents: Arc<dyn IntentCatalogue>,
    pub nlu: Arc<dyn NluExamples>,
    pub uploads: Arc<dyn UploadIntake>,
    pub cookies: CookiePolicy,
}

/// Attributes applied to the `token` and `refresh_token` cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSite::Lax,
        }
    }
}
