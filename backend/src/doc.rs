//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every task, category, account and health endpoint,
//! the two failure schemas and the bearer token security scheme. The document
//! backs Swagger UI in debug builds and is exported with
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::accounts::{AccountResponse, CredentialsBody, LoginResponse};
use crate::inbound::http::categories::{
    CategoryPageResponse, CategoryResponse, CreateCategoryBody, RenameCategoryBody,
};
use crate::inbound::http::error::{ApiErrorResponse, UnauthorizedResponse};
use crate::inbound::http::tasks::{
    CreateTaskBody, TaskPageResponse, TaskResponse, UpdateTaskBody,
};

/// Name of the bearer security scheme.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Adds the JWT bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let bearer = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Token issued by POST /api/v1/accounts/login."))
            .build();
        components.add_security_scheme(BEARER_SCHEME, SecurityScheme::Http(bearer));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Task board API",
        description = "Task and category management guarded by JWT bearer tokens."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::remove_account,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::get_task,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::update_task,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::rename_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiErrorResponse,
        UnauthorizedResponse,
        CredentialsBody,
        AccountResponse,
        LoginResponse,
        CreateTaskBody,
        UpdateTaskBody,
        TaskResponse,
        TaskPageResponse,
        CreateCategoryBody,
        RenameCategoryBody,
        CategoryResponse,
        CategoryPageResponse,
    )),
    tags(
        (name = "accounts", description = "Registration, login and account removal"),
        (name = "tasks", description = "Tasks owned by the caller"),
        (name = "categories", description = "Shared task categories"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
