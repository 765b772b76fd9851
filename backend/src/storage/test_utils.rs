//! Test utilities shared by the storage, domain and REST test modules.
//!
//! `TestEnvironment` owns a temporary directory that is removed when it goes
//! out of scope, even if the test panics.

use chrono::{Duration, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use super::json::JsonExpenseStore;
use super::sqlite::SqliteExpenseStore;
use super::traits::{ExpenseStore, StoreResult};
use crate::domain::models::{Expense, PaymentMethod};

pub struct TestEnvironment {
    _temp_dir: TempDir,
    base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = TempDir::with_prefix("expense_tracker_test")?;
        let base_path = temp_dir.path().to_path_buf();
        Ok(Self {
            _temp_dir: temp_dir,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    pub fn json_store(&self) -> JsonExpenseStore {
        JsonExpenseStore::new(self.base_path.join("expenses.json"))
            .expect("failed to create JSON test store")
    }

    /// JSON store behind the trait object the use cases consume
    pub fn shared_store(&self) -> Arc<dyn ExpenseStore> {
        Arc::new(self.json_store())
    }

    pub async fn sqlite_store(&self) -> SqliteExpenseStore {
        SqliteExpenseStore::open(self.base_path.join("expenses.db"))
            .await
            .expect("failed to create SQLite test store")
    }
}

/// A valid expense dated `days_ago` days before now
pub fn expense_at(amount: f64, category: &str, method: PaymentMethod, days_ago: i64) -> Expense {
    let date = Utc::now() - Duration::days(days_ago);
    Expense::new(amount, category, method, Some(date), None, None)
        .expect("test expense should be valid")
}

/// Save each expense and return the stored copies
pub async fn seed(store: &dyn ExpenseStore, expenses: Vec<Expense>) -> StoreResult<Vec<Expense>> {
    let mut saved = Vec::with_capacity(expenses.len());
    for expense in expenses {
        saved.push(store.save(&expense).await?);
    }
    Ok(saved)
}
