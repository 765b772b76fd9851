use std::sync::Arc;

use crate::domain::errors::ExpenseError;
use crate::domain::models::Expense;
use crate::storage::ExpenseStore;

#[derive(Clone)]
pub struct GetExpenseByIdUseCase {
    store: Arc<dyn ExpenseStore>,
}

impl GetExpenseByIdUseCase {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, expense_id: i64) -> Result<Expense, ExpenseError> {
        self.store
            .get_by_id(expense_id)
            .await?
            .ok_or(ExpenseError::NotFound(expense_id))
    }
}
