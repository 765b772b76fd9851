use std::sync::Arc;
use tracing::info;

use crate::domain::commands::expenses::CreateExpenseCommand;
use crate::domain::errors::ExpenseError;
use crate::domain::models::{Expense, PaymentMethod};
use crate::storage::ExpenseStore;

/// Validate a new expense and persist it
#[derive(Clone)]
pub struct CreateExpenseUseCase {
    store: Arc<dyn ExpenseStore>,
}

impl CreateExpenseUseCase {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, command: CreateExpenseCommand) -> Result<Expense, ExpenseError> {
        let payment_method: PaymentMethod = command.payment_method.parse()?;
        let expense = Expense::new(
            command.amount,
            &command.category,
            payment_method,
            command.date,
            command.description.as_deref(),
            None,
        )?;

        let saved = self.store.save(&expense).await?;
        info!("Created expense {:?}: {}", saved.id(), saved);
        Ok(saved)
    }
}
