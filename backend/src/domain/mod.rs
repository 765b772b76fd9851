//! # Domain Module
//!
//! Business logic for the expense tracker. Nothing here knows which storage
//! adapter or transport is in use: the use cases reach persistence only
//! through the [`ExpenseStore`](crate::storage::ExpenseStore) trait.
//!
//! ## Module Organization
//!
//! - **models**: The `Expense` entity and `PaymentMethod`
//! - **errors**: Validation and use-case error types
//! - **expense_service**: Pure aggregation (summaries and spending trends)
//! - **expense_filter**: Range and attribute filtering over the store
//! - **commands**: Input types for the create and update use cases
//! - **use_cases**: One orchestrator per application operation
//!
//! ## Business Rules
//!
//! - Amounts are strictly positive and rounded to cents
//! - Categories are trimmed, title-cased and never blank
//! - Descriptions are trimmed; blank descriptions are stored as absent
//! - Validation always happens before the store is touched

pub mod commands;
pub mod errors;
pub mod expense_filter;
pub mod expense_service;
pub mod models;
pub mod use_cases;

pub use errors::{ExpenseError, ValidationError};
pub use expense_filter::{filter_expenses, ExpenseFilter};
pub use expense_service::{ExpenseService, MonthlySummary, SpendingTrend};
pub use models::{Expense, PaymentMethod};
