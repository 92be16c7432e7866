//! Order endpoints.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use std::sync::Arc;
use tracing::info;

use order_common::OrderError;

use crate::error::ApiError;
use crate::serializers::{render_order, render_order_item};
use crate::state::AppState;
use crate::submission::{build_submit_request, parse_order_id, REMOTE_USER_HEADER};
use crate::validation::{validate_order, OrderRequest};

/// POST /api/orders - Validate and submit a new order
pub async fn create_order_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::malformed_body(rejection.body_text()))?;

    let validated = {
        let config = state.config.read().await;
        validate_order(&request, &config)?
    };

    let user = headers
        .get(REMOTE_USER_HEADER)
        .and_then(|value| value.to_str().ok());

    let submit_request = build_submit_request(&validated);
    let ack = state.submitter.submit(&submit_request, user).await?;
    let order_id = parse_order_id(&ack)?;
    counter!("orders_submitted_total").increment(1);
    info!(
        order_id,
        items = validated.order_items.len(),
        user = user.unwrap_or("anonymous"),
        "Order submitted"
    );

    let order = state.catalog.get_order(order_id).await?.ok_or_else(|| {
        OrderError::InternalError(format!("Submitted order {} is not in the catalog", order_id))
    })?;
    let items = state.catalog.list_order_items(order_id).await?;
    let urls = state.urls().await;

    Ok((StatusCode::CREATED, Json(render_order(&order, &items, &urls))).into_response())
}

/// GET /api/orders/:id - Get an order with its items
pub async fn get_order_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(order_id): Path<i64>,
) -> Result<Response, ApiError> {
    let order = state
        .catalog
        .get_order(order_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {} not found", order_id)))?;
    let items = state.catalog.list_order_items(order_id).await?;
    let urls = state.urls().await;

    Ok(Json(render_order(&order, &items, &urls)).into_response())
}

/// GET /api/order-items/:id - Get a single order item
pub async fn get_order_item_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(item_id): Path<i64>,
) -> Result<Response, ApiError> {
    let item = state
        .catalog
        .get_order_item(item_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order item {} not found", item_id)))?;
    let urls = state.urls().await;

    Ok(Json(render_order_item(&item, &urls)).into_response())
}
