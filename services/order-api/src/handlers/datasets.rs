//! Dataset representation endpoints.

use axum::{
    extract::{Extension, Path},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::serializers::{render_dataset, render_dataset_list};
use crate::state::AppState;

/// GET /api/datasets - List dataset footprints as a FeatureCollection
pub async fn list_datasets_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let datasets = state.catalog.list_dataset_representations().await?;
    let urls = state.urls().await;

    Ok((
        [(header::CONTENT_TYPE, "application/geo+json")],
        Json(render_dataset_list(&datasets, &urls)),
    )
        .into_response())
}

/// GET /api/datasets/:id - Get a dataset footprint
pub async fn get_dataset_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(dataset_id): Path<i64>,
) -> Result<Response, ApiError> {
    let dataset = state
        .catalog
        .get_dataset_representation(dataset_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Dataset {} not found", dataset_id)))?;
    let urls = state.urls().await;

    Ok((
        [(header::CONTENT_TYPE, "application/geo+json")],
        Json(render_dataset(&dataset, &urls)),
    )
        .into_response())
}
