//! # REST API for the Dashboard

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::DashboardQuery;
use tracing::info;

use super::errors::expense_error_response;
use super::mappers::DashboardMapper;
use crate::domain::use_cases::DEFAULT_DASHBOARD_DAYS;
use crate::AppState;

/// Aggregated spending data for the last `days` days (default 30, at most 365)
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    info!("GET /api/dashboard - query: {:?}", query);

    let days = query.days.unwrap_or(DEFAULT_DASHBOARD_DAYS);
    match state.get_dashboard_data.execute(days).await {
        Ok(data) => (StatusCode::OK, Json(DashboardMapper::to_dto(data))).into_response(),
        Err(e) => expense_error_response(&e),
    }
}
