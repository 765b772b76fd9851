//! Filtering of stored expenses by date range and attributes.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::errors::ExpenseError;
use crate::domain::models::{Expense, PaymentMethod};
use crate::storage::ExpenseStore;

/// Optional criteria combined with logical AND
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl ExpenseFilter {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.category.is_none()
            && self.payment_method.is_none()
            && self.min_amount.is_none()
            && self.max_amount.is_none()
    }
}

/// Apply `filter` to the contents of `store`.
///
/// The date range is only pushed down to the store when both ends are given;
/// a lone start or end date is ignored.
pub async fn filter_expenses(
    store: &dyn ExpenseStore,
    filter: &ExpenseFilter,
) -> Result<Vec<Expense>, ExpenseError> {
    let method = filter
        .payment_method
        .as_deref()
        .map(str::parse::<PaymentMethod>)
        .transpose()?;

    let expenses = match (filter.start_date, filter.end_date) {
        (Some(start), Some(end)) => store.get_by_date_range(start, end).await?,
        _ => store.get_all().await?,
    };
    let fetched = expenses.len();

    let category = filter.category.as_deref().map(str::to_lowercase);
    let filtered: Vec<Expense> = expenses
        .into_iter()
        .filter(|e| match &category {
            Some(c) => e.category().to_lowercase() == *c,
            None => true,
        })
        .filter(|e| method.map_or(true, |m| e.payment_method() == m))
        .filter(|e| filter.min_amount.map_or(true, |min| e.amount() >= min))
        .filter(|e| filter.max_amount.map_or(true, |max| e.amount() <= max))
        .collect();

    debug!("Filtered {} of {} expenses", filtered.len(), fetched);
    Ok(filtered)
}
