//! # SQLite Storage Module
//!
//! Relational implementation of the expense store, built on an sqlx
//! connection pool. Updates and deletes run inside a transaction.

pub mod connection;
pub mod expense_repository;

pub use connection::DbConnection;
pub use expense_repository::SqliteExpenseStore;
