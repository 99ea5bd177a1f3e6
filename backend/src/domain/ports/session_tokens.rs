//! Driving port for the token side of authentication.

use async_trait::async_trait;

use crate::domain::{Error, IssuedToken, TokenPair, User};

/// Issues tokens after login and turns presented tokens back into users.
#[async_trait]
pub trait SessionTokens: Send + Sync {
    /// Short-lived access token for the OAuth2 password flow.
    fn issue_bearer(&self, user: &User) -> Result<IssuedToken, Error>;

    /// Access and refresh tokens for cookie login.
    fn issue_cookie_pair(&self, user: &User) -> Result<TokenPair, Error>;

    /// Exchange a refresh token for a new cookie access token.
    async fn refresh(&self, refresh_token: &str) -> Result<IssuedToken, Error>;

    /// Resolve an access token to the user it was issued for.
    async fn resolve(&self, access_token: &str) -> Result<User, Error>;
}
