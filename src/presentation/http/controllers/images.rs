// src/presentation/http/controllers/images.rs
use crate::application::{
    commands::images::UploadImageCommand, dto::ArticleImageDto,
    queries::articles::ListArticleImagesQuery,
};
use crate::presentation::http::{
    error::{HttpError, HttpResult, IntoHttpResult},
    extractors::Admin,
    openapi::StatusResponse,
    state::HttpState,
};
use axum::{
    Extension, Json,
    extract::{Multipart, Path, multipart::MultipartError},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

/// Multipart body of an image upload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ImageUploadForm {
    /// May be omitted or blank.
    pub title: Option<String>,
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

fn multipart_error(err: MultipartError) -> HttpError {
    HttpError::new(err.status(), err.body_text())
}

#[utoipa::path(
    get,
    path = "/admin/api/articles/{id}/images",
    params(("id" = i64, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "The article's images.", body = [ArticleImageDto]),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such article.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Images"
)]
pub async fn list_article_images(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<ArticleImageDto>>> {
    state
        .services
        .article_queries
        .list_article_images(ListArticleImagesQuery { article_id: id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/admin/api/articles/{id}/images",
    params(("id" = i64, Path, description = "Article identifier")),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored and attached.", body = ArticleImageDto),
        (status = 400, description = "Missing image, empty file or unsupported type.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such article.", body = crate::presentation::http::error::ErrorResponse),
        (status = 413, description = "Upload too large.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Images"
)]
pub async fn upload_article_image(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> HttpResult<(StatusCode, Json<ArticleImageDto>)> {
    let mut title = None;
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("title") => title = Some(field.text().await.map_err(multipart_error)?),
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content = field.bytes().await.map_err(multipart_error)?;
                image = Some((file_name, content));
            }
            _ => {}
        }
    }

    let title = title.unwrap_or_default();
    let (file_name, content) =
        image.ok_or_else(|| HttpError::new(StatusCode::BAD_REQUEST, "missing field: image"))?;

    let uploaded = state
        .services
        .image_commands
        .upload_image(UploadImageCommand {
            article_id: id,
            title,
            file_name,
            content,
        })
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(uploaded)))
}

#[utoipa::path(
    delete,
    path = "/admin/api/images/{id}",
    params(("id" = i64, Path, description = "Image identifier")),
    responses(
        (status = 200, description = "Image row and file deleted.", body = StatusResponse),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such image.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Images"
)]
pub async fn delete_image(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .image_commands
        .delete_image(id)
        .await
        .into_http()?;
    Ok(Json(StatusResponse::deleted()))
}
