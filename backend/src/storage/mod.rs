//! # Storage Module
//!
//! Handles all persistence for the expense tracker.
//!
//! The domain layer depends only on the [`ExpenseStore`] trait; the concrete
//! backend is picked at startup from configuration:
//!
//! - **json** - a single JSON file, next id = max id + 1
//! - **sqlite** - an sqlx SQLite pool with transactional updates and deletes

pub mod json;
pub mod sqlite;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use json::JsonExpenseStore;
pub use sqlite::SqliteExpenseStore;
pub use traits::{ExpenseStore, StoreError, StoreResult};
