//! Driving port for credential checks.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for verifying login credentials.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the matching user, or `Unauthorized` when the email is unknown
    /// or the password is wrong.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
