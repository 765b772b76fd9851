use std::sync::Arc;
use tracing::info;

use crate::domain::commands::expenses::UpdateExpenseCommand;
use crate::domain::errors::ExpenseError;
use crate::domain::models::{Expense, PaymentMethod};
use crate::storage::ExpenseStore;

/// Apply a partial update through the entity's validating setters
#[derive(Clone)]
pub struct UpdateExpenseUseCase {
    store: Arc<dyn ExpenseStore>,
}

impl UpdateExpenseUseCase {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, command: UpdateExpenseCommand) -> Result<Expense, ExpenseError> {
        let payment_method = command
            .payment_method
            .as_deref()
            .map(str::parse::<PaymentMethod>)
            .transpose()?;

        let mut expense = self
            .store
            .get_by_id(command.expense_id)
            .await?
            .ok_or(ExpenseError::NotFound(command.expense_id))?;

        if let Some(amount) = command.amount {
            expense.update_amount(amount)?;
        }
        if let Some(category) = command.category.as_deref() {
            expense.update_category(category)?;
        }
        if let Some(method) = payment_method {
            expense.set_payment_method(method);
        }
        if let Some(description) = command.description.as_deref() {
            expense.set_description(Some(description));
        }

        let updated = self.store.update(&expense).await?;
        info!("Updated expense {}", command.expense_id);
        Ok(updated)
    }
}
