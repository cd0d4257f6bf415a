//! In-memory port doubles and app assembly shared by the HTTP integration
//! tests.
//!
//! The doubles implement the outbound repository ports over `Mutex`-guarded
//! vectors so the real domain services, token service and HTTP adapters run
//! end to end without a database.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use chrono::Duration;
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};
use taskboard::domain::ports::{
    AccountCommand, AccountRepository, AccountRepositoryError, CategoryRepository,
    CategoryRepositoryError, RegisterAccountRequest, TaskRepository, TaskRepositoryError,
};
use taskboard::domain::{
    Account, AccountService, Category, CategoryId, CategoryService, Credentials, PageRequest,
    Task, TaskId, TaskService, UserId, UserRole, Username,
};
use taskboard::inbound::http::configure_api;
use taskboard::inbound::http::state::{HttpState, HttpStatePorts};
use taskboard::inbound::http::translator::ResponseTranslator;
use taskboard::outbound::security::{BcryptPasswordHasher, JwtTokenService};
use tokio_util::sync::CancellationToken;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";
const SECRET: &[u8] = b"integration-secret-that-is-long-enough";
const ISSUER: &str = "task-management-tests";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn window<T: Clone>(items: impl Iterator<Item = T>, page: PageRequest) -> Vec<T> {
    let offset = usize::try_from(page.offset()).expect("offset fits usize");
    let limit = usize::try_from(page.limit()).expect("limit fits usize");
    items.skip(offset).take(limit).collect()
}

#[derive(Default)]
pub struct InMemoryTasks {
    rows: Mutex<Vec<Task>>,
}

impl InMemoryTasks {
    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTasks {
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        Ok(lock(&self.rows).iter().find(|task| task.id == *id).cloned())
    }

    async fn list(
        &self,
        owner: Option<UserId>,
        page: PageRequest,
    ) -> Result<Vec<Task>, TaskRepositoryError> {
        let rows = lock(&self.rows);
        let visible = rows
            .iter()
            .filter(|task| owner.is_none_or(|owner| task.owner_id == owner))
            .cloned();
        Ok(window(visible, page))
    }

    async fn insert(&self, task: &Task) -> Result<(), TaskRepositoryError> {
        let mut rows = lock(&self.rows);
        if rows.iter().any(|row| row.id == task.id) {
            return Err(TaskRepositoryError::query("record already exists"));
        }
        rows.push(task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> Result<(), TaskRepositoryError> {
        let mut rows = lock(&self.rows);
        let slot = rows
            .iter_mut()
            .find(|row| row.id == task.id)
            .ok_or_else(|| TaskRepositoryError::query("task row vanished"))?;
        *slot = task.clone();
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), TaskRepositoryError> {
        lock(&self.rows).retain(|row| row.id != *id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCategories {
    rows: Mutex<Vec<Category>>,
}

impl InMemoryCategories {
    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn find_by_id(
        &self,
        id: &CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        Ok(lock(&self.rows).iter().find(|row| row.id == *id).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Category>, CategoryRepositoryError> {
        let rows = lock(&self.rows);
        Ok(window(rows.iter().cloned(), page))
    }

    async fn insert(&self, category: &Category) -> Result<(), CategoryRepositoryError> {
        lock(&self.rows).push(category.clone());
        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<(), CategoryRepositoryError> {
        let mut rows = lock(&self.rows);
        let slot = rows
            .iter_mut()
            .find(|row| row.id == category.id)
            .ok_or_else(|| CategoryRepositoryError::query("category row vanished"))?;
        *slot = category.clone();
        Ok(())
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), CategoryRepositoryError> {
        lock(&self.rows).retain(|row| row.id != *id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAccounts {
    rows: Mutex<Vec<Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccounts {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(lock(&self.rows).iter().find(|row| row.id == *id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(lock(&self.rows)
            .iter()
            .find(|row| row.username == *username)
            .cloned())
    }

    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut rows = lock(&self.rows);
        if rows.iter().any(|row| row.username == account.username) {
            return Err(AccountRepositoryError::duplicate_username(
                account.username.as_str(),
            ));
        }
        rows.push(account.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), AccountRepositoryError> {
        lock(&self.rows).retain(|row| row.id != *id);
        Ok(())
    }
}

/// Fully wired HTTP state plus handles on the in-memory stores.
pub struct World {
    pub state: HttpState,
    pub tasks: Arc<InMemoryTasks>,
    pub categories: Arc<InMemoryCategories>,
}

impl World {
    /// Wire the real services over empty stores and seed an admin account.
    pub async fn new() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let tasks = Arc::new(InMemoryTasks::default());
        let categories = Arc::new(InMemoryCategories::default());
        let accounts = Arc::new(InMemoryAccounts::default());
        let tokens = Arc::new(JwtTokenService::new(
            SECRET,
            ISSUER,
            Duration::minutes(5),
            clock.clone(),
        ));

        let task_service = Arc::new(TaskService::new(
            tasks.clone(),
            categories.clone(),
            clock.clone(),
        ));
        let category_service = Arc::new(CategoryService::new(categories.clone(), clock.clone()));
        let account_service = Arc::new(AccountService::new(
            accounts,
            Arc::new(BcryptPasswordHasher::with_cost(4)),
            tokens.clone(),
            clock.clone(),
        ));

        let admin = Credentials::try_from_parts(ADMIN_USERNAME, ADMIN_PASSWORD)
            .expect("valid admin credentials");
        account_service
            .register(
                RegisterAccountRequest {
                    credentials: admin,
                    role: UserRole::Admin,
                },
                &CancellationToken::new(),
            )
            .await
            .into_result()
            .expect("admin registered");

        let ports = HttpStatePorts {
            tasks: task_service.clone(),
            tasks_query: task_service,
            categories: category_service.clone(),
            categories_query: category_service,
            accounts: account_service.clone(),
            login: account_service,
            tokens,
        };
        let state = HttpState::new(
            ports,
            ResponseTranslator::with_tracing(clock),
            CancellationToken::new(),
        );
        Self {
            state,
            tasks,
            categories,
        }
    }

    /// Build the `/api/v1` application over this world.
    pub async fn service(
        &self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new(self.state.clone()))
                .service(web::scope("/api/v1").configure(configure_api)),
        )
        .await
    }
}

/// Register `username` through the HTTP surface and return the account body.
pub async fn register<S>(app: &S, username: &str, password: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/accounts/register")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
    actix_test::read_body_json(response).await
}

/// Log in through the HTTP surface and return the bearer token.
pub async fn login<S>(app: &S, username: &str, password: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/accounts/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    body["token"]
        .as_str()
        .expect("token string")
        .to_owned()
}

/// `Authorization` header value for `token`.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
