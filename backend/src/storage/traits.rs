//! # Storage Traits
//!
//! Defines the storage abstraction that lets the domain layer work with the
//! JSON file store and the SQLite store interchangeably. The domain only ever
//! sees `Arc<dyn ExpenseStore>`.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

use crate::domain::models::{Expense, PaymentMethod};

/// Errors raised by a persistence adapter
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("expense with id {0} not found")]
    NotFound(i64),
    #[error("cannot update an expense without an id")]
    MissingId,
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON data: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("malformed persisted expense: {0}")]
    Corrupt(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for expenses.
///
/// Implementations must be safe to share across concurrently running
/// requests. Consistency under concurrent writers is the implementation's
/// responsibility.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Persist a new expense and return it with its assigned id
    async fn save(&self, expense: &Expense) -> StoreResult<Expense>;

    async fn get_by_id(&self, expense_id: i64) -> StoreResult<Option<Expense>>;

    async fn get_all(&self) -> StoreResult<Vec<Expense>>;

    /// Expenses whose date lies in `[start, end]`
    async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Expense>>;

    /// Case-insensitive category match
    async fn get_by_category(&self, category: &str) -> StoreResult<Vec<Expense>>;

    async fn get_by_payment_method(&self, method: PaymentMethod) -> StoreResult<Vec<Expense>>;

    /// Replace a stored expense. Fails with `NotFound` if its id is unknown.
    async fn update(&self, expense: &Expense) -> StoreResult<Expense>;

    /// Returns true if the expense existed and was removed
    async fn delete(&self, expense_id: i64) -> StoreResult<bool>;

    async fn get_total_by_category(&self) -> StoreResult<BTreeMap<String, f64>>;

    async fn get_total_by_payment_method(&self) -> StoreResult<BTreeMap<String, f64>>;

    async fn get_count_by_category(&self) -> StoreResult<BTreeMap<String, i64>>;

    /// Case-insensitive substring search over descriptions
    async fn search_by_description(&self, term: &str) -> StoreResult<Vec<Expense>>;

    /// Expenses dated within the last `days` days up to now
    async fn get_recent_expenses(&self, days: i64) -> StoreResult<Vec<Expense>> {
        let end = Utc::now();
        let start = Duration::try_days(days)
            .and_then(|window| end.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.get_by_date_range(start, end).await
    }
}
