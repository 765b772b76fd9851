//! Translation of domain errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::error;

use crate::domain::{ExpenseError, ValidationError};

pub fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
        .into_response()
}

pub fn validation_error_response(err: &ValidationError) -> Response {
    error_response(StatusCode::BAD_REQUEST, err.to_string())
}

/// Validation → 400, NotFound → 404, store failures → 500
pub fn expense_error_response(err: &ExpenseError) -> Response {
    match err {
        ExpenseError::Validation(e) => validation_error_response(e),
        ExpenseError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Expense not found"),
        ExpenseError::Store(e) => {
            error!("Store failure: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
