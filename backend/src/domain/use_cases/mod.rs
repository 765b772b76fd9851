//! Application operations, one orchestrator per file.
//!
//! Every use case holds a shared handle to the store and is cheap to clone,
//! so the REST layer keeps one instance of each in its state.

pub mod create_expense;
pub mod delete_expense;
pub mod get_all_expenses;
pub mod get_dashboard_data;
pub mod get_expense_by_id;
pub mod get_filtered_expenses;
pub mod update_expense;

pub use create_expense::CreateExpenseUseCase;
pub use delete_expense::DeleteExpenseUseCase;
pub use get_all_expenses::GetAllExpensesUseCase;
pub use get_dashboard_data::{
    DashboardData, DashboardSummary, GetDashboardDataUseCase, PeriodInfo, RecentExpense,
    DEFAULT_DASHBOARD_DAYS, MAX_DASHBOARD_DAYS, MIN_DASHBOARD_DAYS,
};
pub use get_expense_by_id::GetExpenseByIdUseCase;
pub use get_filtered_expenses::GetFilteredExpensesUseCase;
pub use update_expense::UpdateExpenseUseCase;
