// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{articles, categories, images, site},
    error::PageError,
    openapi::{self, StatusResponse},
    urls::PATTERNS,
    views,
};
use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get},
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Router-level settings that do not belong to the application services.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

pub fn build_router(state: HttpState, options: RouterOptions) -> Router {
    let origins: Vec<HeaderValue> = options
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    let mut router = Router::new();
    for pattern in &PATTERNS {
        router = router.route(&pattern.router_path(), get(views::page));
    }

    router
        .merge(openapi::docs_router())
        .merge(admin_router(options.max_upload_bytes))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

fn admin_router(max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/admin/api/site", get(site::admin_site))
        .route(
            "/admin/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/admin/api/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/admin/api/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/admin/api/articles/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route(
            "/admin/api/articles/{id}/images",
            get(images::list_article_images)
                .post(images::upload_article_image)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/admin/api/images/{id}", delete(images::delete_image))
}

async fn not_found() -> PageError {
    PageError::not_found()
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse::ok())
}
