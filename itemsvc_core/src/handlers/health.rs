//! Home and health handlers

use crate::{models::ApiResponse, AppState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, warn};

pub async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "endpoints": {
            "health": "GET /health",
            "create": "POST /item",
            "get": "GET /item/{id}",
            "update": "PUT /item/{id}",
            "patch": "PATCH /item/{id}"
        }
    })))
}

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /health");

    let mut health_info = serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "version": state.version,
        "using_database": state.db_manager.is_some(),
    });

    if let Some(db_manager) = &state.db_manager {
        if let Err(e) = db_manager.health_check().await {
            warn!("Health check failed: {}", e);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::<()>::error(format!("Database unavailable: {}", e))),
            )
                .into_response();
        }
        health_info["database_status"] = serde_json::Value::String("healthy".to_string());
    }

    (StatusCode::OK, Json(ApiResponse::success(health_info))).into_response()
}
