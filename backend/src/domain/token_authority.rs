//! Token issuance and resolution on top of a [`TokenIssuer`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account_service::map_user_error;
use crate::domain::ports::{SessionTokens, TokenError, TokenIssuer, UserRepository};
use crate::domain::{
    Error, IssuedToken, TokenClaims, TokenKind, TokenLifetimes, TokenPair, User, UserId,
};

const UNVERIFIED: &str = "Could not validate credentials";

/// Implements [`SessionTokens`] with configurable lifetimes.
#[derive(Clone)]
pub struct TokenAuthority<T, R> {
    issuer: Arc<T>,
    users: Arc<R>,
    lifetimes: TokenLifetimes,
}

impl<T, R> TokenAuthority<T, R> {
    pub fn new(issuer: Arc<T>, users: Arc<R>, lifetimes: TokenLifetimes) -> Self {
        Self {
            issuer,
            users,
            lifetimes,
        }
    }
}

fn map_token_error(error: TokenError) -> Error {
    match error {
        TokenError::Expired => Error::unauthorized("Token has expired"),
        TokenError::Invalid { .. } | TokenError::WrongKind => {
            tracing::debug!(error = %error, "token rejected");
            Error::unauthorized(UNVERIFIED)
        }
        TokenError::Signing { message } => {
            Error::internal(format!("token signing failed: {message}"))
        }
    }
}

impl<T, R> TokenAuthority<T, R>
where
    T: TokenIssuer,
    R: UserRepository,
{
    async fn owner_of(&self, claims: &TokenClaims) -> Result<User, Error> {
        let id = UserId::new(&claims.sub).map_err(|_| Error::unauthorized(UNVERIFIED))?;
        self.users
            .find_by_id(&id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized(UNVERIFIED))
    }
}

#[async_trait]
impl<T, R> SessionTokens for TokenAuthority<T, R>
where
    T: TokenIssuer,
    R: UserRepository,
{
    fn issue_bearer(&self, user: &User) -> Result<IssuedToken, Error> {
        self.issuer
            .issue(user, TokenKind::Access, self.lifetimes.bearer)
            .map_err(map_token_error)
    }

    fn issue_cookie_pair(&self, user: &User) -> Result<TokenPair, Error> {
        let access = self
            .issuer
            .issue(user, TokenKind::Access, self.lifetimes.cookie_access)
            .map_err(map_token_error)?;
        let refresh = self
            .issuer
            .issue(user, TokenKind::Refresh, self.lifetimes.refresh)
            .map_err(map_token_error)?;
        Ok(TokenPair { access, refresh })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<IssuedToken, Error> {
        let claims = self
            .issuer
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(map_token_error)?;
        let user = self.owner_of(&claims).await?;
        self.issuer
            .issue(&user, TokenKind::Access, self.lifetimes.cookie_access)
            .map_err(map_token_error)
    }

    async fn resolve(&self, access_token: &str) -> Result<User, Error> {
        let claims = self
            .issuer
            .verify(access_token, TokenKind::Access)
            .map_err(map_token_error)?;
        self.owner_of(&claims).await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockTokenIssuer, MockUserRepository};
    use crate::domain::{EmailAddress, ErrorCode, Username};
    use chrono::{DateTime, TimeDelta, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn user() -> User {
        User::new(
            UserId::random(),
            Username::new("ada").expect("username"),
            EmailAddress::new("ada@example.org").expect("email"),
        )
    }

    fn claims_for(user: &User, kind: TokenKind) -> TokenClaims {
        TokenClaims {
            sub: user.id().to_string(),
            email: user.email().to_string(),
            kind,
            iat: 0,
            exp: 60,
        }
    }

    fn issued(label: &str) -> IssuedToken {
        IssuedToken {
            token: label.to_owned(),
            expires_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[rstest]
    fn cookie_pair_uses_configured_lifetimes(user: User) {
        let lifetimes = TokenLifetimes::default();
        let mut issuer = MockTokenIssuer::new();
        issuer
            .expect_issue()
            .withf(move |_, kind, ttl| *kind == TokenKind::Access && *ttl == lifetimes.cookie_access)
            .times(1)
            .returning(|_, _, _| Ok(issued("access")));
        issuer
            .expect_issue()
            .withf(move |_, kind, ttl| *kind == TokenKind::Refresh && *ttl == lifetimes.refresh)
            .times(1)
            .returning(|_, _, _| Ok(issued("refresh")));

        let authority =
            TokenAuthority::new(Arc::new(issuer), Arc::new(MockUserRepository::new()), lifetimes);
        let pair = authority.issue_cookie_pair(&user).expect("pair");
        assert_eq!(pair.access.token, "access");
        assert_eq!(pair.refresh.token, "refresh");
    }

    #[rstest]
    fn bearer_tokens_live_thirty_minutes(user: User) {
        let mut issuer = MockTokenIssuer::new();
        issuer
            .expect_issue()
            .withf(|_, _, ttl| *ttl == TimeDelta::minutes(30))
            .returning(|_, _, _| Ok(issued("bearer")));

        let authority = TokenAuthority::new(
            Arc::new(issuer),
            Arc::new(MockUserRepository::new()),
            TokenLifetimes::default(),
        );
        assert_eq!(authority.issue_bearer(&user).expect("bearer").token, "bearer");
    }

    #[rstest]
    #[tokio::test]
    async fn resolve_returns_token_owner(user: User) {
        let claims = claims_for(&user, TokenKind::Access);
        let mut issuer = MockTokenIssuer::new();
        issuer
            .expect_verify()
            .withf(|token, kind| token == "good" && *kind == TokenKind::Access)
            .return_once(move |_, _| Ok(claims));
        let mut users = MockUserRepository::new();
        let stored = user.clone();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(stored)));

        let authority =
            TokenAuthority::new(Arc::new(issuer), Arc::new(users), TokenLifetimes::default());
        assert_eq!(authority.resolve("good").await.expect("resolved"), user);
    }

    #[rstest]
    #[case(TokenError::expired(), "Token has expired")]
    #[case(TokenError::wrong_kind(), UNVERIFIED)]
    #[case(TokenError::invalid("bad signature"), UNVERIFIED)]
    #[tokio::test]
    async fn rejected_tokens_are_unauthorized(
        #[case] failure: TokenError,
        #[case] message: &str,
    ) {
        let mut issuer = MockTokenIssuer::new();
        issuer.expect_verify().return_once(move |_, _| Err(failure));

        let authority = TokenAuthority::new(
            Arc::new(issuer),
            Arc::new(MockUserRepository::new()),
            TokenLifetimes::default(),
        );
        let err = authority.refresh("stale").await.expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), message);
    }

    #[rstest]
    #[tokio::test]
    async fn tokens_for_deleted_users_are_unauthorized(user: User) {
        let claims = claims_for(&user, TokenKind::Refresh);
        let mut issuer = MockTokenIssuer::new();
        issuer.expect_verify().return_once(move |_, _| Ok(claims));
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(None));

        let authority =
            TokenAuthority::new(Arc::new(issuer), Arc::new(users), TokenLifetimes::default());
        let err = authority.refresh("orphan").await.expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
