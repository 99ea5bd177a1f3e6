//! Session helpers that keep handlers free of actix-session details.
//!
//! The session cookie carries only the CSRF token minted at login; identity
//! travels in the signed `token` cookie or a bearer header.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use rand::RngCore;

use crate::domain::Error;

pub(crate) const CSRF_TOKEN_KEY: &str = "csrf_token";
const CSRF_TOKEN_BYTES: usize = 32;

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Mint a fresh random CSRF token, store it, and return it.
    pub fn issue_csrf_token(&self) -> Result<String, Error> {
        let mut bytes = [0_u8; CSRF_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        self.0
            .insert(CSRF_TOKEN_KEY, &token)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        Ok(token)
    }

    /// The CSRF token stored at login, if any.
    pub fn csrf_token(&self) -> Result<Option<String>, Error> {
        self.0
            .get::<String>(CSRF_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Compare a client-supplied token with the stored one.
    ///
    /// A missing session token or a mismatch yields `403 Forbidden`.
    pub fn require_csrf_match(&self, presented: Option<&str>) -> Result<(), Error> {
        let stored = self.csrf_token()?;
        match (stored.as_deref(), presented) {
            (Some(expected), Some(given)) if constant_time_eq(expected, given) => Ok(()),
            _ => Err(Error::forbidden("CSRF token mismatch")),
        }
    }

    /// Drop every key and expire the session cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

fn constant_time_eq(left: &str, right: &str) -> bool {
    left.len() == right.len()
        && left
            .bytes()
            .zip(right.bytes())
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
