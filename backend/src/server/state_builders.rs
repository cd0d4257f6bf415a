//! Builders wiring the Diesel and security adapters into HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

use taskboard::domain::ports::{AccountCommand, RegisterAccountRequest};
use taskboard::domain::{
    AccountService, CategoryService, Credentials, ErrorKind, TaskService, UserRole,
};
use taskboard::inbound::http::state::{HttpState, HttpStatePorts};
use taskboard::inbound::http::translator::ResponseTranslator;
use taskboard::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselCategoryRepository, DieselTaskRepository,
};
use taskboard::outbound::security::{BcryptPasswordHasher, JwtTokenService};

use super::config::ServerSettings;

/// Shared services produced at startup.
pub struct AppServices {
    pub http_state: HttpState,
    /// Used by the admin bootstrap before the listener opens.
    pub accounts: Arc<dyn AccountCommand>,
}

/// Build every port implementation over `pool`.
pub fn build_services(
    pool: &DbPool,
    settings: &ServerSettings,
    shutdown: CancellationToken,
) -> AppServices {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tasks_repo = Arc::new(DieselTaskRepository::new(pool.clone()));
    let categories_repo = Arc::new(DieselCategoryRepository::new(pool.clone()));
    let accounts_repo = Arc::new(DieselAccountRepository::new(pool.clone()));
    let tokens = Arc::new(JwtTokenService::new(
        settings.jwt_secret.as_bytes(),
        settings.jwt_issuer.clone(),
        settings.jwt_ttl,
        clock.clone(),
    ));

    let task_service = Arc::new(TaskService::new(
        tasks_repo,
        categories_repo.clone(),
        clock.clone(),
    ));
    let category_service = Arc::new(CategoryService::new(categories_repo, clock.clone()));
    let account_service = Arc::new(AccountService::new(
        accounts_repo,
        Arc::new(BcryptPasswordHasher::default()),
        tokens.clone(),
        clock.clone(),
    ));

    let ports = HttpStatePorts {
        tasks: task_service.clone(),
        tasks_query: task_service,
        categories: category_service.clone(),
        categories_query: category_service,
        accounts: account_service.clone(),
        login: account_service.clone(),
        tokens,
    };
    AppServices {
        http_state: HttpState::new(ports, ResponseTranslator::with_tracing(clock), shutdown),
        accounts: account_service,
    }
}

/// Admin bootstrap failure.
#[derive(Debug, Error)]
#[error("failed to create admin account: {message}")]
pub struct BootstrapError {
    message: String,
}

/// Register `credentials` as an administrator unless the username exists.
pub async fn ensure_admin_account(
    accounts: &dyn AccountCommand,
    credentials: Credentials,
    cancel: &CancellationToken,
) -> Result<(), BootstrapError> {
    let username = credentials.username().clone();
    let request = RegisterAccountRequest {
        credentials,
        role: UserRole::Admin,
    };
    match accounts.register(request, cancel).await.into_result() {
        Ok(account) => {
            info!(user_id = %account.id, "admin account created");
            Ok(())
        }
        Err(errors) if errors.contains_kind(ErrorKind::IdentityUserAlreadyExists) => {
            info!(%username, "admin account already present");
            Ok(())
        }
        Err(errors) => Err(BootstrapError {
            message: errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use taskboard::domain::ports::RemoveAccountRequest;
    use taskboard::domain::{AccountPayload, Error, OperationResult, UserId};

    use super::*;

    struct StubAccounts {
        outcome: fn() -> OperationResult<AccountPayload>,
        roles: Mutex<Vec<UserRole>>,
    }

    impl StubAccounts {
        fn new(outcome: fn() -> OperationResult<AccountPayload>) -> Self {
            Self {
                outcome,
                roles: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AccountCommand for StubAccounts {
        async fn register(
            &self,
            request: RegisterAccountRequest,
            _cancel: &CancellationToken,
        ) -> OperationResult<AccountPayload> {
            self.roles.lock().expect("roles lock").push(request.role);
            (self.outcome)()
        }

        async fn remove(
            &self,
            _request: RemoveAccountRequest,
            _cancel: &CancellationToken,
        ) -> OperationResult<()> {
            OperationResult::success(())
        }
    }

    fn admin() -> Credentials {
        Credentials::try_from_parts("root", "changeme-now").expect("valid credentials")
    }

    fn created() -> OperationResult<AccountPayload> {
        OperationResult::success(AccountPayload {
            id: UserId::random(),
            username: "root".to_owned(),
            role: UserRole::Admin,
            created_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn registers_admin_role() {
        let accounts = StubAccounts::new(created);
        ensure_admin_account(&accounts, admin(), &CancellationToken::new())
            .await
            .expect("bootstrap");
        assert_eq!(*accounts.roles.lock().expect("roles lock"), vec![UserRole::Admin]);
    }

    #[tokio::test]
    async fn existing_admin_is_left_alone() {
        let accounts = StubAccounts::new(|| {
            OperationResult::failure(Error::identity_user_already_exists("taken"))
        });
        assert!(
            ensure_admin_account(&accounts, admin(), &CancellationToken::new())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn other_failures_abort_startup() {
        let accounts =
            StubAccounts::new(|| OperationResult::failure(Error::unknown("database down")));
        let err = ensure_admin_account(&accounts, admin(), &CancellationToken::new())
            .await
            .expect_err("bootstrap fails");
        assert!(err.to_string().contains("database down"));
    }
}
