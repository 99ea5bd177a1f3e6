//! PostgreSQL persistence adapters built on Diesel.
//!
//! Repositories translate between Diesel rows (`models.rs`) and domain
//! types, and map every driver failure onto the owning port's error enum.
//! Rows and the schema never leave this module.
//!
//! ```ignore
//! use crudhub::outbound::persistence::{DbPool, DieselMemberRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/crudhub")).await?;
//! let members = DieselMemberRepository::new(pool);
//! ```

mod diesel_employee_repository;
mod diesel_error_mapping;
mod diesel_intent_repository;
mod diesel_member_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_employee_repository::DieselEmployeeRepository;
pub use diesel_intent_repository::DieselIntentRepository;
pub use diesel_member_repository::DieselMemberRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
