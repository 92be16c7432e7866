//! Region endpoints.

use axum::{
    extract::{Extension, Path},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::serializers::{render_region, RegionView};
use crate::state::AppState;

/// GET /api/regions - List regions
pub async fn list_regions_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let regions = state.catalog.list_regions().await?;
    let urls = state.urls().await;

    let views: Vec<RegionView> = regions.iter().map(|r| render_region(r, &urls)).collect();
    Ok(Json(views).into_response())
}

/// GET /api/regions/:id - Get a region
pub async fn get_region_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(region_id): Path<i64>,
) -> Result<Response, ApiError> {
    let region = state
        .catalog
        .get_region(region_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Region {} not found", region_id)))?;
    let urls = state.urls().await;

    Ok(Json(render_region(&region, &urls)).into_response())
}
