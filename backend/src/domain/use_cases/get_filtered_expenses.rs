use std::sync::Arc;

use crate::domain::errors::ExpenseError;
use crate::domain::expense_filter::{filter_expenses, ExpenseFilter};
use crate::domain::models::Expense;
use crate::storage::ExpenseStore;

#[derive(Clone)]
pub struct GetFilteredExpensesUseCase {
    store: Arc<dyn ExpenseStore>,
}

impl GetFilteredExpensesUseCase {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, ExpenseError> {
        filter_expenses(self.store.as_ref(), filter).await
    }
}
