//! Expense aggregation logic.
//!
//! `ExpenseService` holds no state: every function works on the slice it is
//! given, so it can be shared freely between concurrent requests.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

use crate::domain::models::Expense;

/// Totals over a set of expenses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlySummary {
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
    pub by_payment_method: BTreeMap<String, f64>,
    pub expense_count: usize,
}

/// Spending over a trailing window of days
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpendingTrend {
    pub total_period: f64,
    /// `total_period / days`, using the requested window length as divisor
    pub average_daily: f64,
    pub expense_count: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseService;

impl ExpenseService {
    pub fn new() -> Self {
        Self
    }

    pub fn monthly_summary(&self, expenses: &[Expense]) -> MonthlySummary {
        let mut summary = MonthlySummary {
            expense_count: expenses.len(),
            ..Default::default()
        };

        for expense in expenses {
            summary.total += expense.amount();
            *summary
                .by_category
                .entry(expense.category().to_string())
                .or_insert(0.0) += expense.amount();
            *summary
                .by_payment_method
                .entry(expense.payment_method().as_str().to_string())
                .or_insert(0.0) += expense.amount();
        }

        summary
    }

    pub fn spending_trend(&self, expenses: &[Expense], days: i64) -> SpendingTrend {
        self.spending_trend_at(expenses, days, Utc::now())
    }

    /// Considers expenses dated on or after `now - days`; a window reaching
    /// past the earliest representable date covers everything
    pub fn spending_trend_at(
        &self,
        expenses: &[Expense],
        days: i64,
        now: DateTime<Utc>,
    ) -> SpendingTrend {
        let cutoff = Duration::try_days(days)
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let (total_period, expense_count) = expenses
            .iter()
            .filter(|e| e.date() >= cutoff)
            .fold((0.0, 0), |(total, count), e| (total + e.amount(), count + 1));

        if expense_count == 0 || days <= 0 {
            return SpendingTrend {
                total_period,
                average_daily: 0.0,
                expense_count,
            };
        }

        SpendingTrend {
            total_period,
            average_daily: total_period / days as f64,
            expense_count,
        }
    }
}
