//! Port for account persistence.

use async_trait::async_trait;

use crate::domain::{Account, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } =>
            "username '{username}' is already registered",
    }
}

/// Port for account storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fetch an account by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Fetch an account by its unique username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// Store a new account.
    ///
    /// Adapters report a unique-constraint violation on the username as
    /// [`AccountRepositoryError::DuplicateUsername`].
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError>;

    /// Remove an account together with the tasks it owns.
    async fn delete(&self, id: &UserId) -> Result<(), AccountRepositoryError>;
}
