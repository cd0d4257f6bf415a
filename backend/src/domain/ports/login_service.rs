//! Driving port for login.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! exchange credentials for an access token without knowing the backing
//! infrastructure, so HTTP handler tests can substitute a test double.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::domain::{Credentials, OperationResult, UserId, UserRole};

/// Token issued on successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginPayload {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user_id: UserId,
    pub role: UserRole,
}

/// Domain use-case port for login.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and issue an access token.
    ///
    /// Fails with `IdentityUserNotFound` or `IncorrectPassword`.
    async fn login(
        &self,
        credentials: Credentials,
        cancel: &CancellationToken,
    ) -> OperationResult<LoginPayload>;
}
