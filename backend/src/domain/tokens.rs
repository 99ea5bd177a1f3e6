//! Signed token vocabulary shared by the token service and its adapters.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Purpose a token was minted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Grants access to protected endpoints.
    Access,
    /// Exchanged for a fresh access token.
    Refresh,
}

/// Claims carried inside every token.
///
/// `iat` and `exp` are Unix timestamps in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// An encoded token and the instant it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Access and refresh tokens handed out together on cookie login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// Lifetimes for each flavour of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    /// Access token returned from the OAuth2 password flow.
    pub bearer: TimeDelta,
    /// Access token stored in the `token` cookie.
    pub cookie_access: TimeDelta,
    /// Refresh token stored in the `refresh_token` cookie.
    pub refresh: TimeDelta,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            bearer: TimeDelta::minutes(30),
            cookie_access: TimeDelta::hours(10),
            refresh: TimeDelta::days(1),
        }
    }
}
