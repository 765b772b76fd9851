use shared::{
    CategoryBreakdown, DashboardResponse, DashboardSummary as SharedDashboardSummary,
    PeriodInfo as SharedPeriodInfo, RecentExpense as SharedRecentExpense, SpendingTrendResponse,
};

use super::expense_mapper::format_date;
use crate::domain::use_cases::{DashboardData, RecentExpense};

pub struct DashboardMapper;

impl DashboardMapper {
    pub fn to_dto(data: DashboardData) -> DashboardResponse {
        DashboardResponse {
            period_info: SharedPeriodInfo {
                days: data.period_info.days,
                start_date: format_date(data.period_info.start_date),
                end_date: format_date(data.period_info.end_date),
            },
            summary: SharedDashboardSummary {
                total_amount: data.summary.total_amount,
                expense_count: data.summary.expense_count,
                average_per_expense: data.summary.average_per_expense,
            },
            by_category: CategoryBreakdown {
                totals: data.category_totals,
                counts: data.category_counts,
            },
            by_payment_method: data.payment_method_totals,
            trend: SpendingTrendResponse {
                total_period: data.trend.total_period,
                average_daily: data.trend.average_daily,
                expense_count: data.trend.expense_count,
            },
            recent_expenses: data
                .recent_expenses
                .iter()
                .map(Self::to_recent_dto)
                .collect(),
        }
    }

    fn to_recent_dto(recent: &RecentExpense) -> SharedRecentExpense {
        let expense = &recent.expense;
        SharedRecentExpense {
            id: expense.id(),
            amount: expense.amount(),
            formatted_amount: expense.formatted_amount(),
            category: expense.category().to_string(),
            payment_method: expense.payment_method().as_str().to_string(),
            date: format_date(expense.date()),
            description: expense.description().map(str::to_string),
            is_recent: recent.is_recent,
        }
    }
}
