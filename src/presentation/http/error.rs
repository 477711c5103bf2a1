// src/presentation/http/error.rs
use crate::application::{ApplicationResult, error::ApplicationError};
use crate::domain::errors::DomainError;
use crate::presentation::templates::RenderError;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON error for the admin API.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        let status = status_of(&err);
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        }
        let message = match err {
            ApplicationError::Validation(msg)
            | ApplicationError::NotFound(msg)
            | ApplicationError::Conflict(msg)
            | ApplicationError::Unauthorized(msg)
            | ApplicationError::Infrastructure(msg) => msg,
            ApplicationError::Domain(domain_err) => domain_err.to_string(),
        };
        Self::new(status, message)
    }

    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

fn status_of(err: &ApplicationError) -> StatusCode {
    match err {
        ApplicationError::Validation(_) => StatusCode::BAD_REQUEST,
        ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
        ApplicationError::Conflict(_) => StatusCode::CONFLICT,
        ApplicationError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ApplicationError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ApplicationError::Domain(domain_err) => match domain_err {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            message: self.message,
        };
        let mut response = (self.status, Json(payload)).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"admin\", charset=\"UTF-8\""),
            );
        }
        response
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}

/// HTML error for the public pages. Only the status reaches the client.
#[derive(Debug)]
pub struct PageError {
    status: StatusCode,
}

impl PageError {
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn from_error(err: ApplicationError) -> Self {
        let status = status_of(&err);
        if status == StatusCode::NOT_FOUND {
            return Self::not_found();
        }
        tracing::error!(error = %err, "page request failed");
        Self::internal()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<RenderError> for PageError {
    fn from(err: RenderError) -> Self {
        tracing::error!(error = %err, "template rendering failed");
        Self::internal()
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let reason = self.status.canonical_reason().unwrap_or("Error");
        let code = self.status.as_u16();
        let body = format!(
            "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{code} {reason}</title></head>\
             <body><h1>{code} {reason}</h1></body></html>\n"
        );
        (self.status, Html(body)).into_response()
    }
}

pub type PageResult<T> = Result<T, PageError>;

pub trait IntoPageResult<T> {
    fn into_page(self) -> PageResult<T>;
}

impl<T> IntoPageResult<T> for ApplicationResult<T> {
    fn into_page(self) -> PageResult<T> {
        self.map_err(PageError::from_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_keep_their_status() {
        let conflict = HttpError::from_error(DomainError::Conflict("dup".into()).into());
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
        let missing = HttpError::from_error(DomainError::NotFound("x".into()).into());
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let broken = HttpError::from_error(DomainError::Persistence("io".into()).into());
        assert_eq!(broken.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_asks_for_basic_credentials() {
        let response = HttpError::from_error(ApplicationError::unauthorized("no")).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let challenge = response.headers().get(WWW_AUTHENTICATE).unwrap();
        assert!(challenge.to_str().unwrap().starts_with("Basic"));
    }

    #[test]
    fn page_errors_collapse_to_404_or_500() {
        assert_eq!(
            PageError::from_error(ApplicationError::not_found("x")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PageError::from_error(ApplicationError::validation("x")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
