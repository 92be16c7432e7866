//! Administrative endpoints.

use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;

/// POST /admin/config/reload - Re-read the configuration file
pub async fn reload_config_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> (StatusCode, Json<Value>) {
    match state.reload_config().await {
        Ok(()) => {
            tracing::info!("Configuration reloaded from {:?}", state.config_path);
            (StatusCode::OK, Json(json!({ "reloaded": true })))
        }
        Err(e) => {
            tracing::error!(error = %e, "Configuration reload failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "reloaded": false, "detail": format!("{:#}", e) })),
            )
        }
    }
}
