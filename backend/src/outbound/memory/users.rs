use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserAccount, UserId};

use super::POISONED;

/// Account store held in memory.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    accounts: Mutex<Vec<UserAccount>>,
}

impl MemoryUserRepository {
    fn with_accounts<T>(
        &self,
        f: impl FnOnce(&mut Vec<UserAccount>) -> Result<T, UserPersistenceError>,
    ) -> Result<T, UserPersistenceError> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| UserPersistenceError::query(POISONED))?;
        f(&mut accounts)
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        self.with_accounts(|accounts| {
            if accounts
                .iter()
                .any(|existing| existing.user.email() == account.user.email())
            {
                return Err(UserPersistenceError::duplicate_email());
            }
            if accounts
                .iter()
                .any(|existing| existing.user.username() == account.user.username())
            {
                return Err(UserPersistenceError::duplicate_username());
            }
            accounts.push(account.clone());
            Ok(())
        })
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        self.with_accounts(|accounts| {
            Ok(accounts
                .iter()
                .find(|account| account.user.email().as_str() == email)
                .cloned())
        })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.with_accounts(|accounts| {
            Ok(accounts
                .iter()
                .find(|account| account.user.id() == id)
                .map(|account| account.user.clone()))
        })
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.with_accounts(|accounts| {
            let mut users: Vec<User> = accounts.iter().map(|a| a.user.clone()).collect();
            users.sort_by(|a, b| a.username().as_str().cmp(b.username().as_str()));
            Ok(users)
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{EmailAddress, PasswordHash, Username};

    fn account(username: &str, email: &str) -> UserAccount {
        UserAccount {
            user: User::new(
                UserId::random(),
                Username::new(username).expect("username"),
                EmailAddress::new(email).expect("email"),
            ),
            password_hash: PasswordHash::new("hash"),
        }
    }

    #[tokio::test]
    async fn rejects_duplicate_email_before_username() {
        let repo = MemoryUserRepository::default();
        repo.insert(&account("ada", "ada@example.org"))
            .await
            .expect("first insert");

        let err = repo
            .insert(&account("ada", "ada@example.org"))
            .await
            .expect_err("duplicate");
        assert_eq!(err, UserPersistenceError::DuplicateEmail);

        let err = repo
            .insert(&account("ada", "lovelace@example.org"))
            .await
            .expect_err("duplicate");
        assert_eq!(err, UserPersistenceError::DuplicateUsername);
    }

    #[tokio::test]
    async fn lists_users_by_username() {
        let repo = MemoryUserRepository::default();
        for (name, email) in [("zed", "z@example.org"), ("amy", "a@example.org")] {
            repo.insert(&account(name, email)).await.expect("insert");
        }
        let names: Vec<String> = repo
            .list()
            .await
            .expect("list")
            .iter()
            .map(|user| user.username().to_string())
            .collect();
        assert_eq!(names, ["amy", "zed"]);
    }
}
