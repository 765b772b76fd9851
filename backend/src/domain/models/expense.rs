//! Domain model for a single expense.
//!
//! An `Expense` can only be built through [`Expense::new`] and only mutated
//! through its named setters, so every instance in the system satisfies the
//! same invariants: a positive amount rounded to cents, a non-blank
//! title-cased category and a trimmed (or absent) description.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::ValidationError;

/// Default window for [`Expense::is_recent`]
pub const DEFAULT_RECENT_DAYS: i64 = 30;
/// Default threshold for [`Expense::is_high_amount`]
pub const DEFAULT_HIGH_AMOUNT_THRESHOLD: f64 = 100.0;

/// Accepted ways of paying for an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
    ];

    /// Wire/storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "cash" => Ok(PaymentMethod::Cash),
            "credit_card" => Ok(PaymentMethod::CreditCard),
            "debit_card" => Ok(PaymentMethod::DebitCard),
            other => Err(ValidationError::InvalidPaymentMethod(other.to_string())),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Expense {
    id: Option<i64>,
    amount: f64,
    category: String,
    payment_method: PaymentMethod,
    date: DateTime<Utc>,
    description: Option<String>,
}

impl Expense {
    /// Build a validated expense. `date` defaults to now.
    pub fn new(
        amount: f64,
        category: &str,
        payment_method: PaymentMethod,
        date: Option<DateTime<Utc>>,
        description: Option<&str>,
        id: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let amount = validate_amount(amount)?;
        let category = normalize_category(category)?;

        Ok(Self {
            id,
            amount,
            category,
            payment_method,
            date: date.unwrap_or_else(Utc::now),
            description: normalize_description(description),
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the same expense carrying the id assigned by a store
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn update_amount(&mut self, new_amount: f64) -> Result<(), ValidationError> {
        self.amount = validate_amount(new_amount)?;
        Ok(())
    }

    pub fn update_category(&mut self, new_category: &str) -> Result<(), ValidationError> {
        self.category = normalize_category(new_category)?;
        Ok(())
    }

    pub fn set_payment_method(&mut self, payment_method: PaymentMethod) {
        self.payment_method = payment_method;
    }

    /// Blank descriptions clear the field
    pub fn set_description(&mut self, description: Option<&str>) {
        self.description = normalize_description(description);
    }

    /// True when the expense is at most `days` whole days old (inclusive)
    pub fn is_recent(&self, days: i64) -> bool {
        self.is_recent_at(days, Utc::now())
    }

    pub fn is_recent_at(&self, days: i64, now: DateTime<Utc>) -> bool {
        let age: Duration = now - self.date;
        age.num_days() <= days
    }

    pub fn is_high_amount(&self, threshold: f64) -> bool {
        self.amount > threshold
    }

    /// `$1,234.50` style rendering of the amount
    pub fn formatted_amount(&self) -> String {
        format_currency(self.amount)
    }
}

/// Identity-free comparison: `id` and `description` are ignored.
impl PartialEq for Expense {
    fn eq(&self, other: &Self) -> bool {
        self.amount == other.amount
            && self.category == other.category
            && self.payment_method == other.payment_method
            && self.date == other.date
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expense: {} - {} ({})",
            self.formatted_amount(),
            self.category,
            self.payment_method
        )
    }
}

fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    let rounded = round_to_cents(amount);
    if !rounded.is_finite() || rounded <= 0.0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(rounded)
}

/// Amounts too large to scale by 100 carry no fractional cents and are kept as is
fn round_to_cents(amount: f64) -> f64 {
    let cents = amount * 100.0;
    if !cents.is_finite() {
        return amount;
    }
    cents.round() / 100.0
}

fn normalize_category(category: &str) -> Result<String, ValidationError> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    Ok(title_case(trimmed))
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Upper-cases the first letter of every word and lower-cases the rest.
/// Any non-alphabetic character starts a new word ("o'neil" -> "O'Neil").
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_is_letter = false;

    for c in input.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }

    out
}

fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn expense(amount: f64, category: &str) -> Expense {
        Expense::new(amount, category, PaymentMethod::Cash, None, None, None).unwrap()
    }

    #[test]
    fn test_amount_rounding_to_zero_is_rejected() {
        for amount in [0.001, 0.004] {
            let result = Expense::new(amount, "Comida", PaymentMethod::Cash, None, None, None);
            assert_eq!(result.unwrap_err(), ValidationError::NonPositiveAmount);
        }

        let mut e = expense(10.0, "Comida");
        assert_eq!(e.update_amount(0.004), Err(ValidationError::NonPositiveAmount));
        assert_eq!(e.amount(), 10.0);
    }

    #[test]
    fn test_half_cent_rounds_up_to_one_cent() {
        assert_eq!(expense(0.005, "Comida").amount(), 0.01);
    }

    #[test]
    fn test_huge_amount_stays_finite() {
        let e = expense(1e307, "Comida");
        assert_eq!(e.amount(), 1e307);
        assert!(!e.formatted_amount().contains("inf"));

        let mut e = expense(10.0, "Comida");
        e.update_amount(1e307).unwrap();
        assert!(e.amount().is_finite());

        let result = Expense::new(f64::INFINITY, "Comida", PaymentMethod::Cash, None, None, None);
        assert_eq!(result.unwrap_err(), ValidationError::NonPositiveAmount);
    }

    #[test]
    fn test_new_normalizes_category_and_amount() {
        let e = Expense::new(25.50, " comida ", PaymentMethod::Cash, None, None, None).unwrap();

        assert_eq!(e.category(), "Comida");
        assert_eq!(e.amount(), 25.5);
        assert_eq!(e.formatted_amount(), "$25.50");
        assert_eq!(e.id(), None);
    }

    #[test]
    fn test_amount_is_rounded_to_cents() {
        assert_eq!(expense(10.126, "Comida").amount(), 10.13);
        assert_eq!(expense(10.124, "Comida").amount(), 10.12);
        assert_eq!(expense(7.0, "Comida").amount(), 7.0);
    }

    #[test]
    fn test_non_positive_amounts_are_rejected() {
        for amount in [0.0, -0.01, -100.0, f64::NAN] {
            let result = Expense::new(amount, "Comida", PaymentMethod::Cash, None, None, None);
            assert_eq!(result.unwrap_err(), ValidationError::NonPositiveAmount);
        }
    }

    #[test]
    fn test_blank_categories_are_rejected() {
        for category in ["", "   ", "\t\n"] {
            let result = Expense::new(10.0, category, PaymentMethod::Cash, None, None, None);
            assert_eq!(result.unwrap_err(), ValidationError::EmptyCategory);
        }
    }

    #[test]
    fn test_title_case_matches_word_boundaries() {
        assert_eq!(expense(1.0, "comida RAPIDA").category(), "Comida Rapida");
        assert_eq!(expense(1.0, "o'neil").category(), "O'Neil");
        assert_eq!(expense(1.0, "café-bar").category(), "Café-Bar");
    }

    #[test]
    fn test_description_is_trimmed_and_blank_becomes_none() {
        let with = Expense::new(1.0, "a", PaymentMethod::Cash, None, Some("  lunch "), None).unwrap();
        let blank = Expense::new(1.0, "a", PaymentMethod::Cash, None, Some("   "), None).unwrap();

        assert_eq!(with.description(), Some("lunch"));
        assert_eq!(blank.description(), None);
    }

    #[test]
    fn test_update_amount_validates_and_rounds() {
        let mut e = expense(10.0, "Comida");

        assert_eq!(e.update_amount(0.0), Err(ValidationError::NonPositiveAmount));
        assert_eq!(e.amount(), 10.0);

        e.update_amount(42.499).unwrap();
        assert_eq!(e.amount(), 42.5);
    }

    #[test]
    fn test_update_category_validates_and_normalizes() {
        let mut e = expense(10.0, "Comida");

        assert_eq!(e.update_category("  "), Err(ValidationError::EmptyCategory));
        assert_eq!(e.category(), "Comida");

        e.update_category(" transporte publico").unwrap();
        assert_eq!(e.category(), "Transporte Publico");
    }

    #[test]
    fn test_is_recent_boundary_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let exactly_30 = now - Duration::days(30);
        let just_over = now - Duration::days(31);

        let e = Expense::new(5.0, "a", PaymentMethod::Cash, Some(exactly_30), None, None).unwrap();
        let old = Expense::new(5.0, "a", PaymentMethod::Cash, Some(just_over), None, None).unwrap();
        let future = Expense::new(5.0, "a", PaymentMethod::Cash, Some(now + Duration::days(3)), None, None).unwrap();

        assert!(e.is_recent_at(DEFAULT_RECENT_DAYS, now));
        assert!(!old.is_recent_at(DEFAULT_RECENT_DAYS, now));
        assert!(future.is_recent_at(DEFAULT_RECENT_DAYS, now));
    }

    #[test]
    fn test_is_high_amount_is_strict() {
        assert!(!expense(100.0, "a").is_high_amount(DEFAULT_HIGH_AMOUNT_THRESHOLD));
        assert!(expense(100.01, "a").is_high_amount(DEFAULT_HIGH_AMOUNT_THRESHOLD));
    }

    #[test]
    fn test_formatted_amount_groups_thousands() {
        assert_eq!(expense(0.5, "a").formatted_amount(), "$0.50");
        assert_eq!(expense(999.99, "a").formatted_amount(), "$999.99");
        assert_eq!(expense(1234.5, "a").formatted_amount(), "$1,234.50");
        assert_eq!(expense(1234567.891, "a").formatted_amount(), "$1,234,567.89");
    }

    #[test]
    fn test_equality_ignores_id_and_description() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap();
        let a = Expense::new(25.5, "Comida", PaymentMethod::Cash, Some(date), Some("x"), Some(1)).unwrap();
        let b = Expense::new(25.5, "comida", PaymentMethod::Cash, Some(date), None, Some(9)).unwrap();
        let c = Expense::new(25.5, "Comida", PaymentMethod::DebitCard, Some(date), None, None).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("cash".parse::<PaymentMethod>(), Ok(PaymentMethod::Cash));
        assert_eq!("credit_card".parse::<PaymentMethod>(), Ok(PaymentMethod::CreditCard));
        assert_eq!("debit_card".parse::<PaymentMethod>(), Ok(PaymentMethod::DebitCard));
        assert_eq!(
            "transfer".parse::<PaymentMethod>(),
            Err(ValidationError::InvalidPaymentMethod("transfer".to_string()))
        );
        assert!("Cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_display() {
        let e = Expense::new(25.5, "comida", PaymentMethod::Cash, None, None, None).unwrap();
        assert_eq!(e.to_string(), "Expense: $25.50 - Comida (cash)");
    }
}
