//! Account registration, login and removal handlers.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::domain::ports::{
    AccessTokenIssuer, AccountCommand, AccountRepository, AccountRepositoryError, LoginPayload,
    LoginService, PasswordHasher, RegisterAccountRequest, RemoveAccountRequest,
};
use crate::domain::{
    Account, AccountPayload, CallerIdentity, Credentials, Error, MAX_PASSWORD_BYTES,
    MIN_PASSWORD_LENGTH, OperationResult, UserId, guard_persistence, guard_persistence_with,
};

const USERNAME_TAKEN_MESSAGE: &str = "Provided username already exists";
const USER_NOT_FOUND_MESSAGE: &str = "Unable to find a user with the specified username";
const INCORRECT_PASSWORD_MESSAGE: &str = "Incorrect password";
const FOREIGN_REMOVAL_MESSAGE: &str = "Cannot remove an account you do not own";

/// Account service implementing the account and login driving ports.
#[derive(Clone)]
pub struct AccountService<A, H> {
    accounts: Arc<A>,
    hasher: Arc<H>,
    tokens: Arc<dyn AccessTokenIssuer>,
    clock: Arc<dyn Clock>,
}

impl<A, H> AccountService<A, H> {
    /// Create a new service.
    pub fn new(
        accounts: Arc<A>,
        hasher: Arc<H>,
        tokens: Arc<dyn AccessTokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
            clock,
        }
    }
}

fn check_password_policy(password: &str) -> Result<(), Error> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Error::identity_creation_failed(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(Error::identity_creation_failed(format!(
            "Password must be at most {MAX_PASSWORD_BYTES} bytes long"
        )));
    }
    Ok(())
}

fn classify_insert_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::DuplicateUsername { .. } => {
            Error::identity_user_already_exists(USERNAME_TAKEN_MESSAGE)
        }
        other => Error::unknown(other.to_string()),
    }
}

impl<A, H> AccountService<A, H>
where
    A: AccountRepository,
    H: PasswordHasher,
{
    async fn register_account(
        &self,
        request: RegisterAccountRequest,
        cancel: &CancellationToken,
    ) -> Result<AccountPayload, Error> {
        let RegisterAccountRequest { credentials, role } = request;
        check_password_policy(credentials.password())?;

        let existing =
            guard_persistence(cancel, self.accounts.find_by_username(credentials.username()))
                .await?;
        if existing.is_some() {
            return Err(Error::identity_user_already_exists(USERNAME_TAKEN_MESSAGE));
        }

        let password_hash = guard_persistence_with(
            cancel,
            self.hasher.hash(credentials.password()),
            |err| Error::identity_creation_failed(err.to_string()),
        )
        .await?;
        let account = Account {
            id: UserId::random(),
            username: credentials.username().clone(),
            password_hash,
            role,
            created_at: self.clock.utc(),
        };
        guard_persistence_with(cancel, self.accounts.insert(&account), classify_insert_error)
            .await?;
        info!(user_id = %account.id, role = %account.role, "account registered");
        Ok(AccountPayload::from(account))
    }

    async fn login_account(
        &self,
        credentials: Credentials,
        cancel: &CancellationToken,
    ) -> Result<LoginPayload, Error> {
        let account =
            guard_persistence(cancel, self.accounts.find_by_username(credentials.username()))
                .await?
                .ok_or_else(|| Error::identity_user_not_found(USER_NOT_FOUND_MESSAGE))?;

        let verified = guard_persistence(
            cancel,
            self.hasher
                .verify(credentials.password(), &account.password_hash),
        )
        .await?;
        if !verified {
            return Err(Error::incorrect_password(INCORRECT_PASSWORD_MESSAGE));
        }

        let identity = CallerIdentity::new(account.id, account.role);
        let issued =
            guard_persistence(cancel, async { self.tokens.issue(&identity) }).await?;
        Ok(LoginPayload {
            token: issued.token,
            expires_at: issued.expires_at,
            user_id: account.id,
            role: account.role,
        })
    }

    async fn remove_account(
        &self,
        request: RemoveAccountRequest,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        let RemoveAccountRequest { caller, account_id } = request;
        if !caller.may_act_for(&account_id) {
            return Err(Error::unauthorized_account_removal(FOREIGN_REMOVAL_MESSAGE));
        }
        guard_persistence(cancel, self.accounts.find_by_id(&account_id))
            .await?
            .ok_or_else(|| {
                Error::identity_user_not_found(format!("No account found with id {account_id}"))
            })?;
        guard_persistence(cancel, self.accounts.delete(&account_id)).await?;
        info!(user_id = %account_id, removed_by = %caller.user_id(), "account removed");
        Ok(())
    }
}

#[async_trait]
impl<A, H> AccountCommand for AccountService<A, H>
where
    A: AccountRepository,
    H: PasswordHasher,
{
    async fn register(
        &self,
        request: RegisterAccountRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<AccountPayload> {
        self.register_account(request, cancel).await.into()
    }

    async fn remove(
        &self,
        request: RemoveAccountRequest,
        cancel: &CancellationToken,
    ) -> OperationResult<()> {
        self.remove_account(request, cancel).await.into()
    }
}

#[async_trait]
impl<A, H> LoginService for AccountService<A, H>
where
    A: AccountRepository,
    H: PasswordHasher,
{
    async fn login(
        &self,
        credentials: Credentials,
        cancel: &CancellationToken,
    ) -> OperationResult<LoginPayload> {
        self.login_account(credentials, cancel).await.into()
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
