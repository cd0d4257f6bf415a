//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod access_tokens;
mod account_command;
mod account_repository;
mod category_command;
mod category_query;
mod category_repository;
mod login_service;
mod password_hasher;
mod task_command;
mod task_query;
mod task_repository;

#[cfg(test)]
pub use access_tokens::{MockAccessTokenIssuer, MockAccessTokenVerifier};
pub use access_tokens::{AccessTokenError, AccessTokenIssuer, AccessTokenVerifier, IssuedToken};
#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, RegisterAccountRequest, RemoveAccountRequest};
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use category_command::MockCategoryCommand;
pub use category_command::{
    CategoryCommand, CreateCategoryRequest, DeleteCategoryRequest, RenameCategoryRequest,
};
#[cfg(test)]
pub use category_query::MockCategoryQuery;
pub use category_query::CategoryQuery;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginPayload, LoginService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use task_command::MockTaskCommand;
pub use task_command::{CreateTaskRequest, DeleteTaskRequest, TaskCommand, UpdateTaskRequest};
#[cfg(test)]
pub use task_query::MockTaskQuery;
pub use task_query::TaskQuery;
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskRepository, TaskRepositoryError};
