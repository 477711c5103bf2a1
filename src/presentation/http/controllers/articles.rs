// src/presentation/http/controllers/articles.rs
use crate::application::{
    admin::ARTICLE_ENTITY,
    commands::articles::SaveArticleCommand,
    dto::ArticleDto,
    queries::articles::GetArticleByIdQuery,
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
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ArticleRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Derived from `title` when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    /// Defaults to now on create and to the stored value on update.
    #[serde(default)]
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub main_page: bool,
    /// Raw category id.
    #[serde(default)]
    pub category: Option<i64>,
}

impl From<ArticleRequest> for SaveArticleCommand {
    fn from(request: ArticleRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            slug: request.slug,
            pub_date: request.pub_date,
            main_page: request.main_page,
            category_id: request.category,
        }
    }
}

/// Change-list view of an article; the category column shows its name.
#[derive(Serialize)]
struct ArticleListRecord {
    id: i64,
    title: String,
    pub_date: DateTime<Utc>,
    slug: String,
    main_page: bool,
    category: Option<String>,
}

impl From<ArticleDto> for ArticleListRecord {
    fn from(article: ArticleDto) -> Self {
        Self {
            id: article.id,
            title: article.title,
            pub_date: article.pub_date,
            slug: article.slug,
            main_page: article.main_page,
            category: article.category.map(|category| category.category),
        }
    }
}

#[utoipa::path(
    get,
    path = "/admin/api/articles",
    responses(
        (status = 200, description = "Article change list, newest first.", body = ChangeListResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
) -> HttpResult<Json<ChangeListResponse>> {
    let articles = state
        .services
        .article_queries
        .list_articles()
        .await
        .into_http()?;
    let records: Vec<ArticleListRecord> = articles.into_iter().map(Into::into).collect();
    let site = state.services.admin_site();
    change_list(&site, ARTICLE_ENTITY, &records).map(Json)
}

#[utoipa::path(
    get,
    path = "/admin/api/articles/{id}",
    params(("id" = i64, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "The article with its inline images.", body = ArticleDto),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such article.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article_by_id(GetArticleByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/admin/api/articles",
    request_body = ArticleRequest,
    responses(
        (status = 201, description = "Article created.", body = ArticleDto),
        (status = 400, description = "Invalid input or unknown category.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
    Json(payload): Json<ArticleRequest>,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let created = state
        .services
        .article_commands
        .create_article(payload.into())
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/admin/api/articles/{id}",
    params(("id" = i64, Path, description = "Article identifier")),
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Article replaced.", body = ArticleDto),
        (status = 400, description = "Invalid input or unknown category.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such article.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
    Path(id): Path<i64>,
    Json(payload): Json<ArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .update_article(id, payload.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/admin/api/articles/{id}",
    params(("id" = i64, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "Article and its images deleted.", body = StatusResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such article.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .article_commands
        .delete_article(id)
        .await
        .into_http()?;
    Ok(Json(StatusResponse::deleted()))
}
