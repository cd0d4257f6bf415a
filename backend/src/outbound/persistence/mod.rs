//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows and domain entities.
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module, and every database failure is mapped onto the port's own
//! error type.
//!
//! # Example
//!
//! ```no_run
//! use taskboard::outbound::persistence::{DbPool, DieselTaskRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), taskboard::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tasks")).await?;
//! let _tasks = DieselTaskRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_account_repository;
mod diesel_category_repository;
mod diesel_error_mapping;
mod diesel_task_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_task_repository::DieselTaskRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
