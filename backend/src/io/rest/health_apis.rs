//! Service information endpoints.

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use shared::{AppInfoResponse, HealthResponse};

use crate::AppState;

/// `GET /`
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(AppInfoResponse {
        app: state.app_info.name.clone(),
        version: state.app_info.version.clone(),
        status: "running".to_string(),
    })
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        app: state.app_info.name.clone(),
    })
}
