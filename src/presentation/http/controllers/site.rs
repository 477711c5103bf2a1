// src/presentation/http/controllers/site.rs
use crate::application::admin::AdminSite;
use crate::presentation::http::{
    error::{HttpError, HttpResult},
    extractors::Admin,
    state::HttpState,
};
use axum::{Extension, Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Rows of a change list, reduced to the entity's `list_display` columns.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChangeListResponse {
    pub entity: String,
    pub columns: Vec<String>,
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Map<String, Value>>,
}

/// Project serialized records onto the change-list columns registered for `entity`.
pub(crate) fn change_list<T: Serialize>(
    site: &AdminSite,
    entity: &str,
    records: &[T],
) -> HttpResult<ChangeListResponse> {
    let model = site.get(entity).ok_or_else(|| {
        HttpError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{entity} is not registered with the admin site"),
        )
    })?;

    let items = records
        .iter()
        .map(|record| {
            serde_json::to_value(record)
                .map(|value| model.change_list_row(&value))
                .map_err(|err| HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
        })
        .collect::<HttpResult<Vec<_>>>()?;

    Ok(ChangeListResponse {
        entity: model.entity.clone(),
        columns: model.list_display.clone(),
        items,
    })
}

#[utoipa::path(
    get,
    path = "/admin/api/site",
    responses(
        (status = 200, description = "Registered entities and how the admin edits them.", body = AdminSite),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("basicAuth" = [])),
    tag = "Admin"
)]
pub async fn admin_site(
    Extension(state): Extension<HttpState>,
    Admin(_admin): Admin,
) -> Json<AdminSite> {
    Json(state.services.admin_site().as_ref().clone())
}
