// src/presentation/http/extractors.rs
use crate::{
    application::{auth::AdminUser, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{Extension, extract::FromRequestParts, http::request::Parts};
use headers::{Authorization, HeaderMapExt, authorization::Basic};

use super::error::HttpError;

/// The admin account, authenticated from an HTTP Basic `Authorization` header.
#[derive(Debug, Clone)]
pub struct Admin(pub AdminUser);

impl<S> FromRequestParts<S> for Admin
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                HttpError::from_error(ApplicationError::Infrastructure(
                    "application state missing".into(),
                ))
            })?;

        let header = parts
            .headers
            .typed_get::<Authorization<Basic>>()
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::Unauthorized(
                    "missing Authorization header".into(),
                ))
            })?;

        let user = app_state
            .services
            .admin_auth()
            .authenticate(header.username(), header.password())
            .await
            .map_err(HttpError::from_error)?;

        Ok(Self(user))
    }
}
