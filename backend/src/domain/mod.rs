//! Domain primitives, aggregates and use-case handlers.
//!
//! Purpose: Define strongly typed entities and the services that implement
//! the driving ports. Nothing here depends on HTTP or Diesel; adapters reach
//! the domain only through [`ports`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorKind`]: tagged failure produced by handlers.
//! - [`OperationResult`] / [`ErrorList`]: uniform handler outcome.
//! - [`Task`], [`Category`], [`Account`]: aggregates and payload projections.
//! - [`TaskService`], [`CategoryService`], [`AccountService`]: handlers.

pub mod account;
pub mod account_service;
pub mod category;
pub mod category_service;
pub mod error;
pub mod identity;
pub mod ids;
pub mod outcome;
pub mod page;
pub mod persistence_guard;
pub mod ports;
pub mod task;
pub mod task_service;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::account::{
    Account, AccountPayload, Credentials, CredentialsValidationError, MAX_USERNAME_LENGTH,
    MAX_PASSWORD_BYTES, MIN_PASSWORD_LENGTH, PasswordHash, Username,
};
pub use self::account_service::AccountService;
pub use self::category::{Category, CategoryName, CategoryNameError, CategoryPayload};
pub use self::category_service::CategoryService;
pub use self::error::{Error, ErrorKind, USER_NOT_ALLOWED_MESSAGE};
pub use self::identity::{CallerIdentity, UnknownRole, UserRole};
pub use self::ids::{CategoryId, InvalidIdentifier, TaskId, UserId};
pub use self::outcome::{ErrorList, OperationResult};
pub use self::page::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest, PageRequestError,
};
pub use self::persistence_guard::{CANCELLED_MESSAGE, guard_persistence, guard_persistence_with};
pub use self::task::{
    Task, TaskPatch, TaskPayload, TaskPriority, TaskValidationError, UnknownPriority,
    validate_description, validate_title,
};
pub use self::task_service::TaskService;
