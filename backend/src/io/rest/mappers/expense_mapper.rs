//! Conversions between the expense wire types and domain types.
//!
//! Request limits that belong to the transport rather than the entity
//! (field lengths, accepted date formats) are enforced here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use shared::{CreateExpenseRequest, ExpenseListQuery, ExpenseResponse, UpdateExpenseRequest};

use crate::domain::commands::expenses::{CreateExpenseCommand, UpdateExpenseCommand};
use crate::domain::{Expense, ExpenseFilter, ValidationError};

pub const MAX_CATEGORY_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(expense: &Expense) -> ExpenseResponse {
        ExpenseResponse {
            id: expense.id().unwrap_or_default(),
            amount: expense.amount(),
            category: expense.category().to_string(),
            payment_method: expense.payment_method().as_str().to_string(),
            date: format_date(expense.date()),
            description: expense.description().map(str::to_string),
            formatted_amount: expense.formatted_amount(),
        }
    }

    pub fn to_create_command(
        request: CreateExpenseRequest,
    ) -> Result<CreateExpenseCommand, ValidationError> {
        check_length("category", &request.category, MAX_CATEGORY_LENGTH)?;
        if let Some(description) = &request.description {
            check_length("description", description, MAX_DESCRIPTION_LENGTH)?;
        }
        let date = request.date.as_deref().map(parse_date).transpose()?;

        Ok(CreateExpenseCommand {
            amount: request.amount,
            category: request.category,
            payment_method: request.payment_method,
            description: request.description,
            date,
        })
    }

    pub fn to_update_command(
        expense_id: i64,
        request: UpdateExpenseRequest,
    ) -> Result<UpdateExpenseCommand, ValidationError> {
        if let Some(category) = &request.category {
            check_length("category", category, MAX_CATEGORY_LENGTH)?;
        }
        if let Some(description) = &request.description {
            check_length("description", description, MAX_DESCRIPTION_LENGTH)?;
        }

        Ok(UpdateExpenseCommand {
            expense_id,
            amount: request.amount,
            category: request.category,
            payment_method: request.payment_method,
            description: request.description,
        })
    }

    /// Blank string parameters are treated as absent
    pub fn to_filter(query: ExpenseListQuery) -> Result<ExpenseFilter, ValidationError> {
        Ok(ExpenseFilter {
            start_date: non_blank(query.start_date)
                .as_deref()
                .map(parse_date)
                .transpose()?,
            end_date: non_blank(query.end_date)
                .as_deref()
                .map(parse_date)
                .transpose()?,
            category: non_blank(query.category),
            payment_method: non_blank(query.payment_method),
            min_amount: query.min_amount,
            max_amount: query.max_amount,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or a bare
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }
    Err(ValidationError::InvalidDate(raw.to_string()))
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::FieldTooLong { field, max });
    }
    Ok(())
}
