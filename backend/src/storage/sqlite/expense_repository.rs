//! SQLite implementation of [`ExpenseStore`].
//!
//! Dates are stored as fixed-width RFC 3339 UTC strings
//! (`2024-01-15T12:30:00.000000000Z`) so that string comparison in SQL
//! matches chronological order.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::connection::DbConnection;
use crate::domain::models::{Expense, PaymentMethod};
use crate::storage::traits::{ExpenseStore, StoreError, StoreResult};

const SELECT_COLUMNS: &str =
    "SELECT id, amount, category, payment_method, date, description FROM expenses";

#[derive(Clone)]
pub struct SqliteExpenseStore {
    db: DbConnection,
}

impl SqliteExpenseStore {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn connect(url: &str) -> StoreResult<Self> {
        Ok(Self::new(DbConnection::new(url).await?))
    }

    pub async fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Ok(Self::new(DbConnection::open(path).await?))
    }

    async fn fetch_expenses(&self, sql: &str, binds: &[String]) -> StoreResult<Vec<Expense>> {
        let mut query = sqlx::query(sql);
        for value in binds {
            query = query.bind(value);
        }
        let rows = query.fetch_all(self.db.pool()).await?;
        rows.iter().map(row_to_expense).collect()
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn row_to_expense(row: &SqliteRow) -> StoreResult<Expense> {
    let id: i64 = row.try_get("id")?;
    let amount: f64 = row.try_get("amount")?;
    let category: String = row.try_get("category")?;
    let raw_method: String = row.try_get("payment_method")?;
    let raw_date: String = row.try_get("date")?;
    let description: Option<String> = row.try_get("description")?;

    let payment_method: PaymentMethod = raw_method.parse().map_err(|_| {
        StoreError::Corrupt(format!(
            "expense {}: unknown payment method '{}'",
            id, raw_method
        ))
    })?;
    let date = DateTime::parse_from_rfc3339(&raw_date)
        .map_err(|e| {
            StoreError::Corrupt(format!("expense {}: bad date '{}': {}", id, raw_date, e))
        })?
        .with_timezone(&Utc);

    Expense::new(
        amount,
        &category,
        payment_method,
        Some(date),
        description.as_deref(),
        Some(id),
    )
    .map_err(|e| StoreError::Corrupt(format!("expense {}: {}", id, e)))
}

#[async_trait]
impl ExpenseStore for SqliteExpenseStore {
    async fn save(&self, expense: &Expense) -> StoreResult<Expense> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (amount, category, payment_method, date, description)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.amount())
        .bind(expense.category())
        .bind(expense.payment_method().as_str())
        .bind(format_date(expense.date()))
        .bind(expense.description())
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted expense {}", id);
        Ok(expense.clone().with_id(id))
    }

    async fn get_by_id(&self, expense_id: i64) -> StoreResult<Option<Expense>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(expense_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_expense).transpose()
    }

    async fn get_all(&self) -> StoreResult<Vec<Expense>> {
        self.fetch_expenses(&format!("{} ORDER BY date DESC", SELECT_COLUMNS), &[])
            .await
    }

    async fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Expense>> {
        self.fetch_expenses(
            &format!("{} WHERE date >= ? AND date <= ? ORDER BY date DESC", SELECT_COLUMNS),
            &[format_date(start), format_date(end)],
        )
        .await
    }

    async fn get_by_category(&self, category: &str) -> StoreResult<Vec<Expense>> {
        self.fetch_expenses(
            &format!("{} WHERE LOWER(category) = LOWER(?) ORDER BY date DESC", SELECT_COLUMNS),
            &[category.to_string()],
        )
        .await
    }

    async fn get_by_payment_method(&self, method: PaymentMethod) -> StoreResult<Vec<Expense>> {
        self.fetch_expenses(
            &format!("{} WHERE payment_method = ? ORDER BY date DESC", SELECT_COLUMNS),
            &[method.as_str().to_string()],
        )
        .await
    }

    async fn update(&self, expense: &Expense) -> StoreResult<Expense> {
        let id = expense.id().ok_or(StoreError::MissingId)?;

        // Dropping `tx` without commit rolls the statement back
        let mut tx = self.db.pool().begin().await?;
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET amount = ?, category = ?, payment_method = ?, date = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(expense.amount())
        .bind(expense.category())
        .bind(expense.payment_method().as_str())
        .bind(format_date(expense.date()))
        .bind(expense.description())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        tx.commit().await?;

        debug!("Updated expense {}", id);
        Ok(expense.clone())
    }

    async fn delete(&self, expense_id: i64) -> StoreResult<bool> {
        let mut tx = self.db.pool().begin().await?;
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(expense_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_total_by_category(&self) -> StoreResult<BTreeMap<String, f64>> {
        let rows = sqlx::query(
            "SELECT category, SUM(amount) AS total FROM expenses GROUP BY category",
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| -> StoreResult<(String, f64)> {
                Ok((row.try_get("category")?, row.try_get("total")?))
            })
            .collect()
    }

    async fn get_total_by_payment_method(&self) -> StoreResult<BTreeMap<String, f64>> {
        let rows = sqlx::query(
            "SELECT payment_method, SUM(amount) AS total FROM expenses GROUP BY payment_method",
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| -> StoreResult<(String, f64)> {
                Ok((row.try_get("payment_method")?, row.try_get("total")?))
            })
            .collect()
    }

    async fn get_count_by_category(&self) -> StoreResult<BTreeMap<String, i64>> {
        let rows = sqlx::query(
            "SELECT category, COUNT(*) AS count FROM expenses GROUP BY category",
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| -> StoreResult<(String, i64)> {
                Ok((row.try_get("category")?, row.try_get("count")?))
            })
            .collect()
    }

    async fn search_by_description(&self, term: &str) -> StoreResult<Vec<Expense>> {
        self.fetch_expenses(
            &format!(
                "{} WHERE description IS NOT NULL AND instr(LOWER(description), LOWER(?)) > 0 ORDER BY date DESC",
                SELECT_COLUMNS
            ),
            &[term.to_string()],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::{expense_at, seed, TestEnvironment};
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_save_and_get_by_id_round_trip() {
        let env = TestEnvironment::new().unwrap();
        let store = env.sqlite_store().await;
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap();
        let original = Expense::new(
            25.5,
            " comida ",
            PaymentMethod::Cash,
            Some(date),
            Some("Almuerzo"),
            None,
        )
        .unwrap();

        let saved = store.save(&original).await.unwrap();
        assert_eq!(saved.id(), Some(1));

        let loaded = store.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(loaded, original);
        assert_eq!(loaded.id(), Some(1));
        assert_eq!(loaded.description(), Some("Almuerzo"));
    }

    #[tokio::test]
    async fn test_round_trip_keeps_sub_second_precision() {
        let env = TestEnvironment::new().unwrap();
        let store = env.sqlite_store().await;
        let original = expense_at(10.0, "Comida", PaymentMethod::Cash, 0);

        let saved = store.save(&original).await.unwrap();
        let loaded = store.get_by_id(saved.id().unwrap()).await.unwrap().unwrap();

        assert_eq!(loaded.date(), original.date());
    }

    #[tokio::test]
    async fn test_get_all_is_newest_first() {
        let env = TestEnvironment::new().unwrap();
        let store = env.sqlite_store().await;
        seed(
            &store,
            vec![
                expense_at(1.0, "a", PaymentMethod::Cash, 5),
                expense_at(2.0, "a", PaymentMethod::Cash, 1),
                expense_at(3.0, "a", PaymentMethod::Cash, 3),
            ],
        )
        .await
        .unwrap();

        let amounts: Vec<f64> = store.get_all().await.unwrap().iter().map(|e| e.amount()).collect();
        assert_eq!(amounts, vec![2.0, 3.0, 1.0]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let env = TestEnvironment::new().unwrap();
        let store = env.sqlite_store().await;
        let mut saved = store.save(&expense_at(10.0, "Comida", PaymentMethod::Cash, 0)).await.unwrap();

        saved.update_category("transporte").unwrap();
        saved.set_payment_method(PaymentMethod::CreditCard);
        store.update(&saved).await.unwrap();

        let loaded = store.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(loaded.category(), "Transporte");
        assert_eq!(loaded.payment_method(), PaymentMethod::CreditCard);

        let ghost = expense_at(5.0, "a", PaymentMethod::Cash, 0).with_id(99);
        assert!(matches!(store.update(&ghost).await, Err(StoreError::NotFound(99))));

        assert!(store.delete(1).await.unwrap());
        assert!(!store.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let env = TestEnvironment::new().unwrap();
        let store = env.sqlite_store().await;
        seed(
            &store,
            vec![
                expense_at(1.0, "a", PaymentMethod::Cash, 0),
                expense_at(2.0, "a", PaymentMethod::Cash, 0),
            ],
        )
        .await
        .unwrap();

        store.delete(2).await.unwrap();
        let next = store.save(&expense_at(3.0, "a", PaymentMethod::Cash, 0)).await.unwrap();
        assert_eq!(next.id(), Some(3));
    }

    #[tokio::test]
    async fn test_grouped_queries() {
        let env = TestEnvironment::new().unwrap();
        let store = env.sqlite_store().await;
        let lunch = Expense::new(25.0, "Comida", PaymentMethod::Cash, None, Some("Almuerzo en Restaurante"), None).unwrap();
        seed(
            &store,
            vec![
                lunch,
                expense_at(30.0, "Comida", PaymentMethod::DebitCard, 1),
                expense_at(50.0, "Transporte", PaymentMethod::Cash, 45),
            ],
        )
        .await
        .unwrap();

        let totals = store.get_total_by_category().await.unwrap();
        assert_eq!(totals["Comida"], 55.0);
        assert_eq!(totals["Transporte"], 50.0);

        let methods = store.get_total_by_payment_method().await.unwrap();
        assert_eq!(methods["cash"], 75.0);
        assert_eq!(methods["debit_card"], 30.0);
        assert!(!methods.contains_key("credit_card"));

        let counts = store.get_count_by_category().await.unwrap();
        assert_eq!(counts["Comida"], 2);
        assert_eq!(counts["Transporte"], 1);

        assert_eq!(store.get_by_category("comida").await.unwrap().len(), 2);
        assert_eq!(store.get_by_payment_method(PaymentMethod::DebitCard).await.unwrap().len(), 1);
        assert_eq!(store.search_by_description("restaurante").await.unwrap().len(), 1);
        assert_eq!(store.get_recent_expenses(30).await.unwrap().len(), 2);
    }
}
