//! Driving port for reading registered users.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users ordered by username.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// One user; `NotFound` when the id is unknown.
    async fn find_user(&self, id: &UserId) -> Result<User, Error>;
}
