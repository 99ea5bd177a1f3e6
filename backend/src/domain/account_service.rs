//! Account registration, login and listing.
//!
//! Password hashing is CPU-bound, so both hashing and verification run on
//! the blocking pool rather than the async reactor.

use std::sync::Arc;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, RegistrationService, UserPersistenceError,
    UserRepository, UsersQuery,
};
use crate::domain::{
    Error, LoginCredentials, NewAccount, PasswordHash, User, UserAccount, UserId,
};

const BAD_CREDENTIALS: &str = "Incorrect username or password";

/// Argon2id PHC string at the default cost. Unknown emails are checked
/// against it so both rejection paths pay for one verification.
pub(crate) const UNKNOWN_ACCOUNT_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0c2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Account service implementing the login, registration and user listing
/// ports.
#[derive(Clone)]
pub struct AccountService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H> {
    /// Create a new service over a user store and a password hasher.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail => Error::invalid_request("Email already registered"),
        UserPersistenceError::DuplicateUsername => {
            Error::invalid_request("Username already taken")
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

impl<R, H> AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn verify_password(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let candidate = Zeroizing::new(candidate.to_owned());
        let hash = hash.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&candidate, &hash))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
            .map_err(map_hash_error)
    }
}

#[async_trait]
impl<R, H> LoginService for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(account) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            let decoy = PasswordHash::new(UNKNOWN_ACCOUNT_HASH);
            if let Err(err) = self.verify_password(credentials.password(), &decoy).await {
                tracing::warn!(error = %err, "decoy password verification failed");
            }
            return Err(Error::unauthorized(BAD_CREDENTIALS));
        };

        if self
            .verify_password(credentials.password(), &account.password_hash)
            .await?
        {
            Ok(account.user)
        } else {
            tracing::debug!(user_id = %account.user.id(), "password mismatch");
            Err(Error::unauthorized(BAD_CREDENTIALS))
        }
    }
}

#[async_trait]
impl<R, H> RegistrationService for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, account: NewAccount) -> Result<User, Error> {
        let NewAccount {
            username,
            email,
            password,
        } = account;
        let hasher = Arc::clone(&self.hasher);
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hash_error)?;

        let stored = UserAccount {
            user: User::new(UserId::random(), username, email),
            password_hash,
        };
        self.users.insert(&stored).await.map_err(map_user_error)?;
        tracing::info!(user_id = %stored.user.id(), "account registered");
        Ok(stored.user)
    }
}

#[async_trait]
impl<R, H> UsersQuery for AccountService<R, H>
where
    R: UserRepository,
    H: Send + Sync,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_user_error)
    }

    async fn find_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}
