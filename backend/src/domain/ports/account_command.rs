//! Driving port for account registration and removal.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{AccountPayload, CallerIdentity, Credentials, OperationResult, UserId, UserRole};

/// Request to register a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAccountRequest {
    pub credentials: Credentials,
    pub role: UserRole,
}

/// Request to remove an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveAccountRequest {
    pub caller: CallerIdentity,
    pub account_id: UserId,
}

/// Driving port for account lifecycle operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register an account.
    ///
    /// Fails with `IdentityUserAlreadyExists` or `IdentityCreationFailed`.
    async fn register(
        &self,
        request: RegisterAccountRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<AccountPayload>;

    /// Remove an account.
    ///
    /// Fails with `UnauthorizedAccountRemoval` or `IdentityUserNotFound`.
    async fn remove(
        &self,
        request: RemoveAccountRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<()>;
}
