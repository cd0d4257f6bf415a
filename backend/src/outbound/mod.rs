//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **security**: bcrypt password hashing and JWT access tokens
//!
//! Adapters only translate between domain types and infrastructure
//! representations; they hold no business rules.

pub mod persistence;
pub mod security;
