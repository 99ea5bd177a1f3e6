//! Credential adapters: Argon2id password hashes and HS256 tokens.

mod argon2_hasher;
mod jwt_tokens;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_tokens::{JwtTokenIssuer, SigningSecret};
