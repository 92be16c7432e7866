//! Order API Service Library
//!
//! HTTP surface for validating and submitting dataset orders, and for
//! browsing orders, administrative divisions, regions and dataset footprints.

pub mod config;
pub mod error;
pub mod geojson;
pub mod handlers;
pub mod serializers;
pub mod state;
pub mod submission;
pub mod validation;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Orders
        .route("/api/orders", post(handlers::orders::create_order_handler))
        .route("/api/orders/:id", get(handlers::orders::get_order_handler))
        .route(
            "/api/order-items/:id",
            get(handlers::orders::get_order_item_handler),
        )
        // Administrative divisions
        .route(
            "/api/administrative-divisions",
            get(handlers::divisions::list_divisions_handler),
        )
        .route(
            "/api/administrative-divisions/:id",
            get(handlers::divisions::get_division_handler),
        )
        // Regions
        .route("/api/regions", get(handlers::regions::list_regions_handler))
        .route(
            "/api/regions/:id",
            get(handlers::regions::get_region_handler),
        )
        // Dataset footprints
        .route(
            "/api/datasets",
            get(handlers::datasets::list_datasets_handler),
        )
        .route(
            "/api/datasets/:id",
            get(handlers::datasets::get_dataset_handler),
        )
        // Admin
        .route(
            "/admin/config/reload",
            post(handlers::admin::reload_config_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
