//! Domain-level command types.
//!
//! The REST layer maps the request DTOs from the `shared` crate into these
//! before calling a use case. Payment methods stay as raw strings here so the
//! use case decides when to parse them.

pub mod expenses {
    use chrono::{DateTime, Utc};

    /// Input for creating a new expense.
    #[derive(Debug, Clone)]
    pub struct CreateExpenseCommand {
        pub amount: f64,
        pub category: String,
        pub payment_method: String,
        pub description: Option<String>,
        /// Defaults to now when absent
        pub date: Option<DateTime<Utc>>,
    }

    /// Partial update of an existing expense. `None` leaves a field unchanged.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateExpenseCommand {
        pub expense_id: i64,
        pub amount: Option<f64>,
        pub category: Option<String>,
        pub payment_method: Option<String>,
        pub description: Option<String>,
    }
}
