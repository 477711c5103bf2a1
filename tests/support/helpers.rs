// tests/support/helpers.rs
use super::mocks::{FixedClock, MemoryMedia, PlainVerifier, RecordingRenderer};
use app_blog::application::{
    admin::AdminSite,
    auth::AdminAuthenticator,
    services::{ApplicationServices, ServiceDependencies},
};
use app_blog::domain::article::ArticleReadRepository;
use app_blog::infrastructure::{
    database,
    repositories::{
        SqliteArticleImageRepository, SqliteArticleReadRepository, SqliteArticleWriteRepository,
        SqliteCategoryRepository,
    },
    util::DefaultSlugGenerator,
};
use app_blog::presentation::http::{
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use axum::{
    Router,
    body::{self, Body},
    http::{Request, Response},
};
use chrono::FixedOffset;
use headers::{Authorization, HeaderMapExt};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::util::ServiceExt as _;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret";

pub async fn memory_pool() -> SqlitePool {
    let pool = database::init_memory_pool().await.expect("in-memory pool");
    database::run_migrations(&pool).await.expect("migrations");
    pool
}

/// The whole application over an in-memory database, with templates and
/// media replaced by recorders.
pub struct TestApp {
    pub router: Router,
    pub services: Arc<ApplicationServices>,
    pub renderer: Arc<RecordingRenderer>,
    pub media: Arc<MemoryMedia>,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::build(None, utc()).await
    }

    pub async fn with_site_offset(offset: FixedOffset) -> Self {
        Self::build(None, offset).await
    }

    pub async fn with_article_read(read: Arc<dyn ArticleReadRepository>) -> Self {
        Self::build(Some(read), utc()).await
    }

    async fn build(read: Option<Arc<dyn ArticleReadRepository>>, site_offset: FixedOffset) -> Self {
        let pool = memory_pool().await;
        let renderer = Arc::new(RecordingRenderer::default());
        let media = Arc::new(MemoryMedia::default());

        let article_read_repo = read
            .unwrap_or_else(|| Arc::new(SqliteArticleReadRepository::new(pool.clone())));

        let services = Arc::new(ApplicationServices::new(ServiceDependencies {
            category_repo: Arc::new(SqliteCategoryRepository::new(pool.clone())),
            article_write_repo: Arc::new(SqliteArticleWriteRepository::new(pool.clone())),
            article_read_repo,
            image_repo: Arc::new(SqliteArticleImageRepository::new(pool.clone())),
            media: media.clone(),
            clock: Arc::new(FixedClock),
            slugger: Arc::new(DefaultSlugGenerator),
            admin_auth: Arc::new(AdminAuthenticator::new(
                ADMIN_USER,
                Some(format!("plain:{ADMIN_PASSWORD}")),
                Arc::new(PlainVerifier),
            )),
            admin_site: Arc::new(AdminSite::blog().unwrap()),
            site_offset,
        }));

        let state = HttpState {
            services: Arc::clone(&services),
            renderer: renderer.clone(),
        };
        let router = build_router(state, RouterOptions::default());

        Self {
            router,
            services,
            renderer,
            media,
            pool,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    /// The template and context of the last page rendered.
    pub fn rendered(&self) -> (String, Value) {
        self.renderer.last().expect("a template was rendered")
    }
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

pub fn with_admin(mut request: Request<Body>) -> Request<Body> {
    request
        .headers_mut()
        .typed_insert(Authorization::basic(ADMIN_USER, ADMIN_PASSWORD));
    request
}

pub fn admin_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    with_admin(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
}

pub fn admin_request(method: &str, uri: &str) -> Request<Body> {
    with_admin(
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Slugs of the `items` in a recorded page context, in order.
pub fn item_slugs(context: &Value) -> Vec<String> {
    context["items"]
        .as_array()
        .expect("items is a list")
        .iter()
        .map(|item| item["slug"].as_str().unwrap().to_string())
        .collect()
}
