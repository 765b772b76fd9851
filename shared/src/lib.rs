//! Wire types shared between the expense tracker backend and its frontend.
//!
//! Everything here is plain serde data. Validation and domain rules live in
//! the backend; these structs only describe the JSON that crosses the wire.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /api/expenses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    /// Expense amount (must be greater than zero)
    pub amount: f64,
    pub category: String,
    /// One of `cash`, `credit_card`, `debit_card`
    pub payment_method: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Optional date override (RFC 3339) - uses current time if not provided
    #[serde(default)]
    pub date: Option<String>,
}

/// Body of `PUT /api/expenses/:id`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Query string of `GET /api/expenses`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

/// Query string of `GET /api/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseResponse {
    pub id: i64,
    pub amount: f64,
    pub category: String,
    pub payment_method: String,
    /// RFC 3339 timestamp
    pub date: String,
    pub description: Option<String>,
    pub formatted_amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<ExpenseResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodInfo {
    pub days: i64,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_amount: f64,
    pub expense_count: usize,
    pub average_per_expense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub totals: BTreeMap<String, f64>,
    pub counts: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingTrendResponse {
    pub total_period: f64,
    pub average_daily: f64,
    pub expense_count: usize,
}

/// One entry of the dashboard's recent expense list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentExpense {
    pub id: Option<i64>,
    pub amount: f64,
    pub formatted_amount: String,
    pub category: String,
    pub payment_method: String,
    pub date: String,
    pub description: Option<String>,
    /// Whether the expense is at most 7 days old
    pub is_recent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub period_info: PeriodInfo,
    pub summary: DashboardSummary,
    pub by_category: CategoryBreakdown,
    pub by_payment_method: BTreeMap<String, f64>,
    pub trend: SpendingTrendResponse,
    pub recent_expenses: Vec<RecentExpense>,
}

/// Body returned for every 4xx/5xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInfoResponse {
    pub app: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub app: String,
}
