//! Administrative division endpoints.

use axum::{
    extract::{Extension, Path, Query},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use storage::DivisionFilter;

use crate::error::ApiError;
use crate::serializers::{render_division_detail, render_division_list};
use crate::state::AppState;

const GEO_JSON: &str = "application/geo+json";

/// Query parameters for listing divisions.
#[derive(Debug, Deserialize, Default)]
pub struct DivisionQuery {
    pub level: Option<i32>,
    pub iso: Option<String>,
}

/// GET /api/administrative-divisions - List divisions as a FeatureCollection
pub async fn list_divisions_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<DivisionQuery>,
) -> Result<Response, ApiError> {
    let filter = DivisionFilter {
        level: query.level,
        iso: query.iso,
    };
    let divisions = state.catalog.list_administrative_divisions(&filter).await?;
    let urls = state.urls().await;

    Ok((
        [(header::CONTENT_TYPE, GEO_JSON)],
        Json(render_division_list(&divisions, &urls)),
    )
        .into_response())
}

/// GET /api/administrative-divisions/:id - Get a division as a Feature
pub async fn get_division_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(division_id): Path<i64>,
) -> Result<Response, ApiError> {
    let division = state
        .catalog
        .get_administrative_division(division_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("Administrative division {} not found", division_id))
        })?;
    let urls = state.urls().await;

    Ok((
        [(header::CONTENT_TYPE, GEO_JSON)],
        Json(render_division_detail(&division, &urls)),
    )
        .into_response())
}
