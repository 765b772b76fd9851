pub mod dashboard_mapper;
pub mod expense_mapper;

pub use dashboard_mapper::DashboardMapper;
pub use expense_mapper::ExpenseMapper;
