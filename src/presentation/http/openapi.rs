// src/presentation/http/openapi.rs
use axum::Router;
use serde::{Deserialize, Serialize};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub const DOCS_PATH: &str = "/admin/api/docs";
pub const OPENAPI_JSON_PATH: &str = "/admin/api/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".into(),
        }
    }

    pub fn deleted() -> Self {
        Self {
            status: "deleted".into(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::site::admin_site,
        crate::presentation::http::controllers::categories::list_categories,
        crate::presentation::http::controllers::categories::get_category,
        crate::presentation::http::controllers::categories::create_category,
        crate::presentation::http::controllers::categories::update_category,
        crate::presentation::http::controllers::categories::delete_category,
        crate::presentation::http::controllers::articles::list_articles,
        crate::presentation::http::controllers::articles::get_article,
        crate::presentation::http::controllers::articles::create_article,
        crate::presentation::http::controllers::articles::update_article,
        crate::presentation::http::controllers::articles::delete_article,
        crate::presentation::http::controllers::images::list_article_images,
        crate::presentation::http::controllers::images::upload_article_image,
        crate::presentation::http::controllers::images::delete_image,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::site::ChangeListResponse,
            crate::presentation::http::controllers::categories::CategoryRequest,
            crate::presentation::http::controllers::articles::ArticleRequest,
            crate::presentation::http::controllers::images::ImageUploadForm,
            crate::application::admin::AdminSite,
            crate::application::admin::ModelAdmin,
            crate::application::admin::Fieldset,
            crate::application::admin::InlineAdmin,
            crate::application::admin::InlineLayout,
            crate::application::dto::CategoryDto,
            crate::application::dto::ArticleDto,
            crate::application::dto::ArticleImageDto
        )
    ),
    tags(
        (name = "Admin", description = "Admin site configuration"),
        (name = "Categories", description = "Category administration"),
        (name = "Articles", description = "Article administration"),
        (name = "Images", description = "Inline article images"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "app_blog admin API",
        description = "Administration of categories, articles and article images",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        components.add_security_scheme(
            "basicAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

pub fn docs_router() -> Router {
    let swagger = SwaggerUi::new(DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi());
    Router::new().merge(swagger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_admin_path() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/admin/api/site",
            "/admin/api/categories",
            "/admin/api/categories/{id}",
            "/admin/api/articles",
            "/admin/api/articles/{id}",
            "/admin/api/articles/{id}/images",
            "/admin/api/images/{id}",
            "/health",
        ] {
            assert!(
                paths.iter().any(|path| path.as_str() == expected),
                "{expected} missing from OpenAPI document"
            );
        }
    }

    #[test]
    fn declares_basic_auth() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("basicAuth"));
    }
}
