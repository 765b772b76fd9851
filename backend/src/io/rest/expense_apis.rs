//! # REST API for Expenses
//!
//! CRUD endpoints plus the filtered listing under `/api/expenses`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{CreateExpenseRequest, ExpenseListQuery, ExpenseListResponse, UpdateExpenseRequest};
use tracing::{info, warn};

use super::errors::{error_response, expense_error_response, validation_error_response};
use super::mappers::ExpenseMapper;
use crate::AppState;

/// Create a new expense
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/expenses - request: {:?}", request);

    let command = match ExpenseMapper::to_create_command(request) {
        Ok(command) => command,
        Err(e) => {
            warn!("Rejected expense: {}", e);
            return validation_error_response(&e);
        }
    };

    match state.create_expense.execute(command).await {
        Ok(expense) => (StatusCode::CREATED, Json(ExpenseMapper::to_dto(&expense))).into_response(),
        Err(e) => {
            warn!("Failed to create expense: {}", e);
            expense_error_response(&e)
        }
    }
}

/// List expenses, filtered when any non-blank query parameter is present
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ExpenseListQuery>,
) -> impl IntoResponse {
    info!("GET /api/expenses - query: {:?}", query);

    let filter = match ExpenseMapper::to_filter(query) {
        Ok(filter) => filter,
        Err(e) => return validation_error_response(&e),
    };

    let result = if filter.is_empty() {
        state.get_all_expenses.execute().await
    } else {
        state.get_filtered_expenses.execute(&filter).await
    };

    match result {
        Ok(expenses) => {
            let expenses: Vec<_> = expenses.iter().map(ExpenseMapper::to_dto).collect();
            let total = expenses.len();
            (StatusCode::OK, Json(ExpenseListResponse { expenses, total })).into_response()
        }
        Err(e) => expense_error_response(&e),
    }
}

/// Get a single expense
pub async fn get_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/expenses/{}", expense_id);

    match state.get_expense_by_id.execute(expense_id).await {
        Ok(expense) => (StatusCode::OK, Json(ExpenseMapper::to_dto(&expense))).into_response(),
        Err(e) => expense_error_response(&e),
    }
}

/// Partially update an expense
pub async fn update_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<i64>,
    Json(request): Json<UpdateExpenseRequest>,
) -> impl IntoResponse {
    info!("PUT /api/expenses/{} - request: {:?}", expense_id, request);

    let command = match ExpenseMapper::to_update_command(expense_id, request) {
        Ok(command) => command,
        Err(e) => return validation_error_response(&e),
    };

    match state.update_expense.execute(command).await {
        Ok(expense) => (StatusCode::OK, Json(ExpenseMapper::to_dto(&expense))).into_response(),
        Err(e) => {
            warn!("Failed to update expense {}: {}", expense_id, e);
            expense_error_response(&e)
        }
    }
}

/// Delete an expense
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/expenses/{}", expense_id);

    match state.delete_expense.execute(expense_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error_response(StatusCode::NOT_FOUND, "Expense not found"),
        Err(e) => expense_error_response(&e),
    }
}
