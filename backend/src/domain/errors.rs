//! Error types surfaced by the domain layer.

use crate::storage::StoreError;

/// Input that breaks a domain invariant. Raised before any store mutation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("amount must be > 0")]
    NonPositiveAmount,
    #[error("category required")]
    EmptyCategory,
    #[error("invalid payment method")]
    InvalidPaymentMethod(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("{field} must be at most {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("days must be between {min} and {max}")]
    DaysOutOfRange { min: i64, max: i64 },
}

/// Failure of one of the expense use cases
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("expense with id {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ExpenseError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ExpenseError::NotFound(id),
            other => ExpenseError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::NonPositiveAmount.to_string(), "amount must be > 0");
        assert_eq!(ValidationError::EmptyCategory.to_string(), "category required");
        assert_eq!(
            ValidationError::InvalidPaymentMethod("transfer".into()).to_string(),
            "invalid payment method"
        );
    }

    #[test]
    fn test_store_not_found_is_lifted() {
        let err: ExpenseError = StoreError::NotFound(7).into();
        assert!(matches!(err, ExpenseError::NotFound(7)));

        let err: ExpenseError = StoreError::MissingId.into();
        assert!(matches!(err, ExpenseError::Store(StoreError::MissingId)));
    }
}
