//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Error, NewAccount, User};

#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Hash the password and store the account.
    async fn register(&self, account: NewAccount) -> Result<User, Error>;
}
