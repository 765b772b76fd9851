use std::sync::Arc;

use crate::domain::errors::ExpenseError;
use crate::domain::models::Expense;
use crate::storage::ExpenseStore;

#[derive(Clone)]
pub struct GetAllExpensesUseCase {
    store: Arc<dyn ExpenseStore>,
}

impl GetAllExpensesUseCase {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<Vec<Expense>, ExpenseError> {
        Ok(self.store.get_all().await?)
    }
}
