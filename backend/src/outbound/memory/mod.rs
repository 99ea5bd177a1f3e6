//! In-process adapters used when no database is configured.
//!
//! State lives behind a `std::sync::Mutex`; no lock is held across an
//! `.await`. Uniqueness rules mirror the SQL constraints so behaviour does
//! not change between backends.

mod employees;
mod intents;
mod members;
mod users;

pub use employees::MemoryEmployeeRepository;
pub use intents::MemoryIntentRepository;
pub use members::MemoryMemberRepository;
pub use users::MemoryUserRepository;

const POISONED: &str = "in-memory store lock poisoned";
