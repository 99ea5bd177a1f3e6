//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel.
//! - **memory**: in-process repositories for database-less runs and tests.
//! - **security**: Argon2id password hashing and HS256 tokens.
//! - **files**: capability-scoped upload storage and CSV previews.
//! - **nlu**: the JSON training-data document.
//!
//! Adapters only translate; rules live in the domain services.

pub mod files;
pub mod memory;
pub mod nlu;
pub mod persistence;
pub mod security;
