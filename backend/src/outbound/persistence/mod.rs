//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository port backed by
//! PostgreSQL through `diesel-async` and a `bb8` connection pool.
//!
//! Diesel row structs (`models.rs`) and the table definition (`schema.rs`)
//! stay private to this module; adapters translate them into domain types and
//! map every driver error into `UserPersistenceError`.
//!
//! # Example
//!
//! ```ignore
//! use users_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let config = PoolConfig::new("postgres://localhost/mydb");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
