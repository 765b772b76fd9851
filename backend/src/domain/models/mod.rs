//! Domain models for the expense tracker.

pub mod expense;

pub use expense::{Expense, PaymentMethod};
