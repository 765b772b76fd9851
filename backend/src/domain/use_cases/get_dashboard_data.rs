//! Dashboard aggregation over a trailing window of days.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::domain::errors::{ExpenseError, ValidationError};
use crate::domain::expense_service::{ExpenseService, SpendingTrend};
use crate::domain::models::Expense;
use crate::storage::ExpenseStore;

pub const DEFAULT_DASHBOARD_DAYS: i64 = 30;
pub const MIN_DASHBOARD_DAYS: i64 = 1;
pub const MAX_DASHBOARD_DAYS: i64 = 365;
const RECENT_EXPENSE_LIMIT: usize = 10;
const RECENT_FLAG_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct PeriodInfo {
    pub days: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_amount: f64,
    pub expense_count: usize,
    pub average_per_expense: f64,
}

#[derive(Debug, Clone)]
pub struct RecentExpense {
    pub expense: Expense,
    /// Dated within the last week
    pub is_recent: bool,
}

/// Everything the dashboard view needs in one read
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub period_info: PeriodInfo,
    pub summary: DashboardSummary,
    /// All-time totals, not limited to the window
    pub category_totals: BTreeMap<String, f64>,
    pub category_counts: BTreeMap<String, i64>,
    pub payment_method_totals: BTreeMap<String, f64>,
    pub trend: SpendingTrend,
    pub recent_expenses: Vec<RecentExpense>,
}

#[derive(Clone)]
pub struct GetDashboardDataUseCase {
    store: Arc<dyn ExpenseStore>,
    service: ExpenseService,
}

impl GetDashboardDataUseCase {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self {
            store,
            service: ExpenseService::new(),
        }
    }

    pub async fn execute(&self, days: i64) -> Result<DashboardData, ExpenseError> {
        if !(MIN_DASHBOARD_DAYS..=MAX_DASHBOARD_DAYS).contains(&days) {
            return Err(ValidationError::DaysOutOfRange {
                min: MIN_DASHBOARD_DAYS,
                max: MAX_DASHBOARD_DAYS,
            }
            .into());
        }
        info!("Building dashboard for the last {} days", days);

        let recent = self.store.get_recent_expenses(days).await?;
        let all = self.store.get_all().await?;

        let monthly = self.service.monthly_summary(&recent);
        let trend = self.service.spending_trend(&all, days);

        let category_totals = self.store.get_total_by_category().await?;
        let payment_method_totals = self.store.get_total_by_payment_method().await?;
        let category_counts = self.store.get_count_by_category().await?;

        let end_date = Utc::now();
        let start_date = end_date - Duration::days(days);

        let average_per_expense = if monthly.expense_count > 0 {
            monthly.total / monthly.expense_count as f64
        } else {
            0.0
        };

        let mut recent_sorted = recent;
        recent_sorted.sort_by(|a, b| b.date().cmp(&a.date()));
        let recent_expenses = recent_sorted
            .into_iter()
            .take(RECENT_EXPENSE_LIMIT)
            .map(|expense| RecentExpense {
                is_recent: expense.is_recent(RECENT_FLAG_DAYS),
                expense,
            })
            .collect();

        Ok(DashboardData {
            period_info: PeriodInfo {
                days,
                start_date,
                end_date,
            },
            summary: DashboardSummary {
                total_amount: monthly.total,
                expense_count: monthly.expense_count,
                average_per_expense,
            },
            category_totals,
            category_counts,
            payment_method_totals,
            trend,
            recent_expenses,
        })
    }
}
