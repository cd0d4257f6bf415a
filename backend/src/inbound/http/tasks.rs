//! Task HTTP handlers.
//!
//! ```text
//! GET    /api/v1/tasks
//! POST   /api/v1/tasks
//! GET    /api/v1/tasks/{id}
//! PATCH  /api/v1/tasks/{id}
//! DELETE /api/v1/tasks/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::{CreateTaskRequest, DeleteTaskRequest, UpdateTaskRequest};
use crate::domain::{
    CallerIdentity, CategoryId, Page, TaskId, TaskPatch, TaskPayload, validate_description,
    validate_title,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::cancellation::RequestCancellation;
use crate::inbound::http::error::{ApiErrorResponse, UnauthorizedResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, RequestRejection, parse_id, parse_page, parse_priority,
};

/// Route prefix used for `Location` headers.
pub const TASKS_PATH: &str = "/api/v1/tasks";

/// Request payload for creating a task.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    /// Optional client-chosen identifier.
    pub id: Option<Uuid>,
    #[schema(example = "Write the quarterly report")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `low`, `medium` (default) or `high`.
    #[schema(example = "high")]
    pub priority: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    pub category_id: Option<Uuid>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Request payload for patching a task. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub is_completed: Option<bool>,
    /// `null` detaches the task from its category.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<Option<Uuid>>,
}

/// Paging parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// One-based page number (default 1).
    pub page: Option<u32>,
    /// Items per page, 1 to 100 (default 20).
    pub page_size: Option<u32>,
}

/// Response payload for a task.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    #[schema(example = "medium")]
    pub priority: String,
    pub is_completed: bool,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskPayload> for TaskResponse {
    fn from(value: TaskPayload) -> Self {
        Self {
            id: *value.id.as_uuid(),
            owner_id: *value.owner_id.as_uuid(),
            title: value.title,
            description: value.description,
            priority: value.priority.to_string(),
            is_completed: value.is_completed,
            category_id: value.category_id.map(|id| *id.as_uuid()),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// One page of tasks.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskPageResponse {
    pub items: Vec<TaskResponse>,
    pub page: u32,
    pub page_size: u32,
}

impl From<Page<TaskPayload>> for TaskPageResponse {
    fn from(value: Page<TaskPayload>) -> Self {
        Self {
            items: value.items.into_iter().map(TaskResponse::from).collect(),
            page: value.page,
            page_size: value.page_size,
        }
    }
}

fn parse_create_body(
    caller: CallerIdentity,
    body: CreateTaskBody,
) -> Result<CreateTaskRequest, RequestRejection> {
    let title = validate_title(&body.title)
        .map_err(|err| RequestRejection::new(FieldName::new("title"), err))?;
    let description = validate_description(&body.description)
        .map_err(|err| RequestRejection::new(FieldName::new("description"), err))?;
    let priority = parse_priority(body.priority.as_deref(), FieldName::new("priority"))?;
    Ok(CreateTaskRequest {
        caller,
        id: body.id.map(TaskId::from_uuid),
        title,
        description,
        priority: priority.unwrap_or_default(),
        is_completed: body.is_completed,
        category_id: body.category_id.map(CategoryId::from_uuid),
    })
}

fn parse_update_body(body: UpdateTaskBody) -> Result<TaskPatch, RequestRejection> {
    let title = body
        .title
        .as_deref()
        .map(validate_title)
        .transpose()
        .map_err(|err| RequestRejection::new(FieldName::new("title"), err))?;
    let description = body
        .description
        .as_deref()
        .map(validate_description)
        .transpose()
        .map_err(|err| RequestRejection::new(FieldName::new("description"), err))?;
    let priority = parse_priority(body.priority.as_deref(), FieldName::new("priority"))?;
    let patch = TaskPatch {
        title,
        description,
        priority,
        is_completed: body.is_completed,
        category_id: body
            .category_id
            .map(|category| category.map(CategoryId::from_uuid)),
    };
    if patch.is_empty() {
        return Err(RequestRejection::new(
            FieldName::new("body"),
            "at least one field must be provided",
        ));
    }
    Ok(patch)
}

/// List tasks visible to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    params(PageQuery),
    responses(
        (status = 200, description = "Tasks", body = TaskPageResponse),
        (status = 400, description = "Invalid paging parameters", body = ApiErrorResponse),
        (status = 401, description = "Unauthorised", body = UnauthorizedResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse)
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    cancel: RequestCancellation,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<TaskPageResponse>> {
    let PageQuery { page, page_size } = query.into_inner();
    let page = parse_page(page, page_size)
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let outcome = state
        .tasks_query
        .list(caller.identity(), page, cancel.token())
        .await;
    let listed = state.translator.resolve(outcome)?;
    Ok(web::Json(TaskPageResponse::from(listed)))
}

/// Fetch one task.
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task", body = TaskResponse),
        (status = 400, description = "Invalid identifier", body = ApiErrorResponse),
        (status = 401, description = "Unauthorised", body = UnauthorizedResponse),
        (status = 403, description = "Task belongs to another user", body = ApiErrorResponse),
        (status = 404, description = "Task not found", body = ApiErrorResponse)
    ),
    tags = ["tasks"],
    operation_id = "getTask"
)]
#[get("/tasks/{id}")]
pub async fn get_task(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    cancel: RequestCancellation,
    path: web::Path<String>,
) -> ApiResult<web::Json<TaskResponse>> {
    let id: TaskId = parse_id(&path, FieldName::new("id"))
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let outcome = state
        .tasks_query
        .get(caller.identity(), id, cancel.token())
        .await;
    let task = state.translator.resolve(outcome)?;
    Ok(web::Json(TaskResponse::from(task)))
}

/// Create a task owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = CreateTaskBody,
    responses(
        (
            status = 201,
            description = "Task created",
            headers(("Location" = String, description = "URL of the new task")),
            body = TaskResponse
        ),
        (status = 400, description = "Invalid request", body = ApiErrorResponse),
        (status = 401, description = "Unauthorised", body = UnauthorizedResponse),
        (status = 404, description = "Category not found", body = ApiErrorResponse)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    cancel: RequestCancellation,
    payload: web::Json<CreateTaskBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_body(caller.identity(), payload.into_inner())
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let outcome = state.tasks.create(request, cancel.token()).await;
    let task = state.translator.resolve(outcome)?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{TASKS_PATH}/{}", task.id)))
        .json(TaskResponse::from(task)))
}

/// Patch a task.
#[utoipa::path(
    patch,
    path = "/api/v1/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task identifier")),
    request_body = UpdateTaskBody,
    responses(
        (status = 204, description = "Task updated"),
        (status = 400, description = "Invalid request", body = ApiErrorResponse),
        (status = 401, description = "Unauthorised", body = UnauthorizedResponse),
        (status = 403, description = "Task belongs to another user", body = ApiErrorResponse),
        (status = 404, description = "Task or category not found", body = ApiErrorResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse)
    ),
    tags = ["tasks"],
    operation_id = "updateTask"
)]
#[patch("/tasks/{id}")]
pub async fn update_task(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    cancel: RequestCancellation,
    path: web::Path<String>,
    payload: web::Json<UpdateTaskBody>,
) -> ApiResult<HttpResponse> {
    let id: TaskId = parse_id(&path, FieldName::new("id"))
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let patch = parse_update_body(payload.into_inner())
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let request = UpdateTaskRequest {
        caller: caller.identity(),
        id,
        patch,
    };
    let outcome = state.tasks.update(request, cancel.token()).await;
    state.translator.resolve(outcome)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a task.
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task identifier")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 400, description = "Invalid identifier", body = ApiErrorResponse),
        (status = 401, description = "Unauthorised", body = UnauthorizedResponse),
        (status = 403, description = "Task belongs to another user", body = ApiErrorResponse),
        (status = 404, description = "Task not found", body = ApiErrorResponse)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/tasks/{id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    cancel: RequestCancellation,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: TaskId = parse_id(&path, FieldName::new("id"))
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let request = DeleteTaskRequest {
        caller: caller.identity(),
        id,
    };
    let outcome = state.tasks.delete(request, cancel.token()).await;
    state.translator.resolve(outcome)?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
