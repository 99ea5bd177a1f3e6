//! Port for minting and checking signed tokens.

use chrono::TimeDelta;

use crate::domain::{IssuedToken, TokenClaims, TokenKind, User};

use super::define_port_error;

define_port_error! {
    /// Reasons a token could not be issued or was rejected.
    pub enum TokenError {
        /// Signature, encoding or claim shape is wrong.
        Invalid { message: String } => "token rejected: {message}",
        /// The `exp` claim lies in the past.
        Expired => "token expired",
        /// A refresh token was offered where an access token is needed, or the reverse.
        WrongKind => "token has the wrong kind",
        /// Signing the claims failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signs claims for a user and verifies presented tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token of `kind` for `user`, valid for `ttl`.
    fn issue(&self, user: &User, kind: TokenKind, ttl: TimeDelta)
    -> Result<IssuedToken, TokenError>;

    /// Verify signature, expiry and kind, returning the claims.
    fn verify(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, TokenError>;
}
