// src/presentation/http/controllers/categories.rs
use crate::application::{
    admin::CATEGORY_ENTITY, commands::categories::SaveCategoryCommand, dto::CategoryDto,
};
use crate::presentation::http::{
    controllers::site::{ChangeListResponse, change_list},
    error::{HttpResult, IntoHttpResult},
    extractors::Admin,
    openapi::StatusResponse,
    state::HttpState,
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub category: String,
    /// Derived from `category` when omitted.
    #[serde(default)]
    pub slug: Option<String>,
}

impl From<CategoryRequest> for SaveCategoryCommand {
    fn from(request: CategoryRequest) -> Self {
        Self {
            category: request.category,
            slug: request.slug,
        }
    }
}

#[utoipa::path(
    get,
    path = "/admin/api/categories",
    responses(
        (status = 200, description = "Category change list.", body = ChangeListResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Categories"
)]
pub async fn list_categories(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
) -> HttpResult<Json<ChangeListResponse>> {
    let categories = state
        .services
        .category_queries
        .list_categories()
        .await
        .into_http()?;
    let site = state.services.admin_site();
    change_list(&site, CATEGORY_ENTITY, &categories).map(Json)
}

#[utoipa::path(
    get,
    path = "/admin/api/categories/{id}",
    params(("id" = i64, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "The category.", body = CategoryDto),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such category.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Categories"
)]
pub async fn get_category(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
    Path(id): Path<i64>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .category_queries
        .get_category(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/admin/api/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created.", body = CategoryDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already in use.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
    Json(payload): Json<CategoryRequest>,
) -> HttpResult<(StatusCode, Json<CategoryDto>)> {
    let created = state
        .services
        .category_commands
        .create_category(payload.into())
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/admin/api/categories/{id}",
    params(("id" = i64, Path, description = "Category identifier")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category replaced.", body = CategoryDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such category.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already in use.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Categories"
)]
pub async fn update_category(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryRequest>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .category_commands
        .update_category(id, payload.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/admin/api/categories/{id}",
    params(("id" = i64, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category deleted; its articles keep no category.", body = StatusResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such category.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .category_commands
        .delete_category(id)
        .await
        .into_http()?;
    Ok(Json(StatusResponse::deleted()))
}
