//! crudhub: a small CRUD and NLU-data service.
//!
//! The crate follows a ports-and-adapters layout: [`domain`] owns the rules,
//! [`inbound`] turns HTTP requests into domain calls and [`outbound`]
//! implements the persistence, credential and file ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
