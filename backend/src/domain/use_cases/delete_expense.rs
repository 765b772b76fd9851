use std::sync::Arc;
use tracing::info;

use crate::domain::errors::ExpenseError;
use crate::storage::ExpenseStore;

/// Remove an expense. Absence is reported as `false`, not as an error.
#[derive(Clone)]
pub struct DeleteExpenseUseCase {
    store: Arc<dyn ExpenseStore>,
}

impl DeleteExpenseUseCase {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, expense_id: i64) -> Result<bool, ExpenseError> {
        let deleted = self.store.delete(expense_id).await?;
        if deleted {
            info!("Deleted expense {}", expense_id);
        }
        Ok(deleted)
    }
}
