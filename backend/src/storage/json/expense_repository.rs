//! # JSON Expense Repository
//!
//! Flat-file implementation of [`ExpenseStore`]. All expenses live in a
//! single pretty-printed JSON array:
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "amount": 25.5,
//!     "category": "Comida",
//!     "payment_method": "cash",
//!     "date": "2024-01-15T12:30:00Z",
//!     "description": "Almuerzo"
//!   }
//! ]
//! ```
//!
//! Every operation reloads the file, so edits made by another process are
//! picked up; concurrent writers from different processes are last-writer-wins.
//! Within one process all file access is serialized by a mutex and writes go
//! through a temp file followed by an atomic rename.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::domain::models::{Expense, PaymentMethod};
use crate::storage::traits::{ExpenseStore, StoreError, StoreResult};

/// On-disk shape of one expense
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExpenseRecord {
    id: i64,
    amount: f64,
    category: String,
    payment_method: String,
    date: DateTime<Utc>,
    description: Option<String>,
}

impl ExpenseRecord {
    fn from_expense(expense: &Expense, id: i64) -> Self {
        Self {
            id,
            amount: expense.amount(),
            category: expense.category().to_string(),
            payment_method: expense.payment_method().as_str().to_string(),
            date: expense.date(),
            description: expense.description().map(str::to_string),
        }
    }

    /// Re-validates the record through the entity constructor
    fn into_expense(self) -> StoreResult<Expense> {
        let payment_method: PaymentMethod = self.payment_method.parse().map_err(|_| {
            StoreError::Corrupt(format!(
                "expense {}: unknown payment method '{}'",
                self.id, self.payment_method
            ))
        })?;

        Expense::new(
            self.amount,
            &self.category,
            payment_method,
            Some(self.date),
            self.description.as_deref(),
            Some(self.id),
        )
        .map_err(|e| StoreError::Corrupt(format!("expense {}: {}", self.id, e)))
    }
}

/// JSON-file backed expense store
pub struct JsonExpenseStore {
    file_path: PathBuf,
    lock: Mutex<()>,
}

impl JsonExpenseStore {
    /// Open (and create if missing) the JSON file at `file_path`
    pub fn new<P: AsRef<Path>>(file_path: P) -> StoreResult<Self> {
        let store = Self {
            file_path: file_path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        };
        store.ensure_file_exists()?;
        info!("JSON expense store ready at {}", store.file_path.display());
        Ok(store)
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn ensure_file_exists(&self) -> StoreResult<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        if !self.file_path.exists() {
            self.write_records(&[])?;
        }
        Ok(())
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The mutex protects no data of its own, so a poisoned lock is safe to reuse.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_records(&self) -> StoreResult<Vec<ExpenseRecord>> {
        let file = File::open(&self.file_path)?;
        let records: Vec<ExpenseRecord> = serde_json::from_reader(BufReader::new(file))?;
        Ok(records)
    }

    fn write_records(&self, records: &[ExpenseRecord]) -> StoreResult<()> {
        let temp_path = self.file_path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &self.file_path)?;
        Ok(())
    }

    fn load_expenses(&self) -> StoreResult<Vec<Expense>> {
        let _guard = self.guard();
        self.read_records()?
            .into_iter()
            .map(ExpenseRecord::into_expense)
            .collect()
    }

    fn load_matching<F>(&self, predicate: F) -> StoreResult<Vec<Expense>>
    where
        F: Fn(&Expense) -> bool,
    {
        Ok(self
            .load_expenses()?
            .into_iter()
            .filter(|e| predicate(e))
            .collect())
    }

    fn next_id(records: &[ExpenseRecord]) -> i64 {
        records.iter().map(|r| r.id).max().map_or(1, |max| max + 1)
    }
}

#[async_trait]
impl ExpenseStore for JsonExpenseStore {
    async fn save(&self, expense: &Expense) -> StoreResult<Expense> {
        let _guard = self.guard();
        let mut records = self.read_records()?;

        let id = expense.id().unwrap_or_else(|| Self::next_id(&records));
        records.push(ExpenseRecord::from_expense(expense, id));
        self.write_records(&records)?;

        debug!("Saved expense {} to {}", id, self.file_path.display());
        Ok(expense.clone().with_id(id))
    }

    async fn get_by_id(&self, expense_id: i64) -> StoreResult<Option<Expense>> {
        let record = {
            let _guard = self.guard();
            self.read_records()?.into_iter().find(|r| r.id == expense_id)
        };
        record.map(ExpenseRecord::into_expense).transpose()
    }

    async fn get_all(&self) -> StoreResult<Vec<Expense>> {
        self.load_expenses()
    }

    async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Expense>> {
        self.load_matching(|e| start <= e.date() && e.date() <= end)
    }

    async fn get_by_category(&self, category: &str) -> StoreResult<Vec<Expense>> {
        let wanted = category.to_lowercase();
        self.load_matching(|e| e.category().to_lowercase() == wanted)
    }

    async fn get_by_payment_method(&self, method: PaymentMethod) -> StoreResult<Vec<Expense>> {
        self.load_matching(|e| e.payment_method() == method)
    }

    async fn update(&self, expense: &Expense) -> StoreResult<Expense> {
        let id = expense.id().ok_or(StoreError::MissingId)?;

        let _guard = self.guard();
        let mut records = self.read_records()?;
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = ExpenseRecord::from_expense(expense, id);
        self.write_records(&records)?;

        debug!("Updated expense {}", id);
        Ok(expense.clone())
    }

    async fn delete(&self, expense_id: i64) -> StoreResult<bool> {
        let _guard = self.guard();
        let mut records = self.read_records()?;
        let before = records.len();
        records.retain(|r| r.id != expense_id);

        if records.len() == before {
            return Ok(false);
        }
        self.write_records(&records)?;
        debug!("Deleted expense {}", expense_id);
        Ok(true)
    }

    async fn get_total_by_category(&self) -> StoreResult<BTreeMap<String, f64>> {
        let mut totals = BTreeMap::new();
        for expense in self.load_expenses()? {
            *totals.entry(expense.category().to_string()).or_insert(0.0) += expense.amount();
        }
        Ok(totals)
    }

    async fn get_total_by_payment_method(&self) -> StoreResult<BTreeMap<String, f64>> {
        let mut totals = BTreeMap::new();
        for expense in self.load_expenses()? {
            *totals
                .entry(expense.payment_method().as_str().to_string())
                .or_insert(0.0) += expense.amount();
        }
        Ok(totals)
    }

    async fn get_count_by_category(&self) -> StoreResult<BTreeMap<String, i64>> {
        let mut counts = BTreeMap::new();
        for expense in self.load_expenses()? {
            *counts.entry(expense.category().to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn search_by_description(&self, term: &str) -> StoreResult<Vec<Expense>> {
        let needle = term.to_lowercase();
        self.load_matching(|e| {
            e.description()
                .map_or(false, |d| d.to_lowercase().contains(&needle))
        })
    }
}
