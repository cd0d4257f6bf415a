//! Category HTTP handlers.
//!
//! Reads are open to every authenticated caller; mutations are checked by the
//! category service.
//!
//! ```text
//! GET    /api/v1/categories
//! POST   /api/v1/categories
//! GET    /api/v1/categories/{id}
//! PATCH  /api/v1/categories/{id}
//! DELETE /api/v1/categories/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{CreateCategoryRequest, DeleteCategoryRequest, RenameCategoryRequest};
use crate::domain::{CategoryId, CategoryName, CategoryPayload, Page};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::cancellation::RequestCancellation;
use crate::inbound::http::error::{ApiErrorResponse, UnauthorizedResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tasks::PageQuery;
use crate::inbound::http::validation::{FieldName, RequestRejection, parse_id, parse_page};

/// Route prefix used for `Location` headers.
pub const CATEGORIES_PATH: &str = "/api/v1/categories";

/// Request payload for creating a category.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryBody {
    pub id: Option<Uuid>,
    #[schema(example = "Errands")]
    pub name: String,
}

/// Request payload for renaming a category.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameCategoryBody {
    pub name: String,
}

/// Response payload for a category.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CategoryPayload> for CategoryResponse {
    fn from(value: CategoryPayload) -> Self {
        Self {
            id: *value.id.as_uuid(),
            name: value.name,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// One page of categories.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPageResponse {
    pub items: Vec<CategoryResponse>,
    pub page: u32,
    pub page_size: u32,
}

impl From<Page<CategoryPayload>> for CategoryPageResponse {
    fn from(value: Page<CategoryPayload>) -> Self {
        Self {
            items: value.items.into_iter().map(CategoryResponse::from).collect(),
            page: value.page,
            page_size: value.page_size,
        }
    }
}

fn parse_name(raw: &str) -> Result<CategoryName, RequestRejection> {
    CategoryName::new(raw).map_err(|err| RequestRejection::new(FieldName::new("name"), err))
}

/// List categories.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(PageQuery),
    responses(
        (status = 200, description = "Categories", body = CategoryPageResponse),
        (status = 400, description = "Invalid paging parameters", body = ApiErrorResponse),
        (status = 401, description = "Unauthorised", body = UnauthorizedResponse)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    _caller: AuthenticatedCaller,
    cancel: RequestCancellation,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<CategoryPageResponse>> {
    let PageQuery { page, page_size } = query.into_inner();
    let page = parse_page(page, page_size)
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let outcome = state.categories_query.list(page, cancel.token()).await;
    let listed = state.translator.resolve(outcome)?;
    Ok(web::Json(CategoryPageResponse::from(listed)))
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 400, description = "Invalid identifier", body = ApiErrorResponse),
        (status = 401, description = "Unauthorised", body = UnauthorizedResponse),
        (status = 404, description = "Category not found", body = ApiErrorResponse)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    _caller: AuthenticatedCaller,
    cancel: RequestCancellation,
    path: web::Path<String>,
) -> ApiResult<web::Json<CategoryResponse>> {
    let id: CategoryId = parse_id(&path, FieldName::new("id"))
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let outcome = state.categories_query.get(id, cancel.token()).await;
    let category = state.translator.resolve(outcome)?;
    Ok(web::Json(CategoryResponse::from(category)))
}

/// Create a category. Requires the admin role.
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryBody,
    responses(
        (
            status = 201,
            description = "Category created",
            headers(("Location" = String, description = "URL of the new category")),
            body = CategoryResponse
        ),
        (status = 400, description = "Invalid request", body = ApiErrorResponse),
        (status = 401, description = "Unauthorised", body = UnauthorizedResponse),
        (status = 403, description = "Caller is not an administrator", body = ApiErrorResponse)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    cancel: RequestCancellation,
    payload: web::Json<CreateCategoryBody>,
) -> ApiResult<HttpResponse> {
    let CreateCategoryBody { id, name } = payload.into_inner();
    let name = parse_name(&name).map_err(|err| state.translator.bad_request(err.to_string()))?;
    let request = CreateCategoryRequest {
        caller: caller.identity(),
        id: id.map(CategoryId::from_uuid),
        name,
    };
    let outcome = state.categories.create(request, cancel.token()).await;
    let category = state.translator.resolve(outcome)?;
    Ok(HttpResponse::Created()
        .insert_header((
            header::LOCATION,
            format!("{CATEGORIES_PATH}/{}", category.id),
        ))
        .json(CategoryResponse::from(category)))
}

/// Rename a category. Requires the admin role.
#[utoipa::path(
    patch,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category identifier")),
    request_body = RenameCategoryBody,
    responses(
        (status = 204, description = "Category renamed"),
        (status = 400, description = "Invalid request", body = ApiErrorResponse),
        (status = 401, description = "Unauthorised", body = UnauthorizedResponse),
        (status = 403, description = "Caller is not an administrator", body = ApiErrorResponse),
        (status = 404, description = "Category not found", body = ApiErrorResponse)
    ),
    tags = ["categories"],
    operation_id = "renameCategory"
)]
#[patch("/categories/{id}")]
pub async fn rename_category(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    cancel: RequestCancellation,
    path: web::Path<String>,
    payload: web::Json<RenameCategoryBody>,
) -> ApiResult<HttpResponse> {
    let id: CategoryId = parse_id(&path, FieldName::new("id"))
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let name = parse_name(&payload.name)
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let request = RenameCategoryRequest {
        caller: caller.identity(),
        id,
        name,
    };
    let outcome = state.categories.rename(request, cancel.token()).await;
    state.translator.resolve(outcome)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a category. Requires the admin role.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category identifier")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, description = "Invalid identifier", body = ApiErrorResponse),
        (status = 401, description = "Unauthorised", body = UnauthorizedResponse),
        (status = 403, description = "Caller is not an administrator", body = ApiErrorResponse),
        (status = 404, description = "Category not found", body = ApiErrorResponse)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    cancel: RequestCancellation,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: CategoryId = parse_id(&path, FieldName::new("id"))
        .map_err(|err| state.translator.bad_request(err.to_string()))?;
    let request = DeleteCategoryRequest {
        caller: caller.identity(),
        id,
    };
    let outcome = state.categories.delete(request, cancel.token()).await;
    state.translator.resolve(outcome)?;
    Ok(HttpResponse::NoContent().finish())
}
