use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::path::Path;
use tracing::info;

use crate::storage::traits::StoreResult;

const MAX_CONNECTIONS: u32 = 5;

/// DbConnection owns the SQLite pool and the expense schema
#[derive(Clone)]
pub struct DbConnection {
    pool: SqlitePool,
}

impl DbConnection {
    /// Connect to a database URL such as `sqlite://expenses.db`, creating it if needed
    pub async fn new(url: &str) -> StoreResult<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating SQLite database {}", url);
            Sqlite::create_database(url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(url)
            .await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Open a database file directly, creating it if missing
    pub async fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn setup_schema(pool: &SqlitePool) -> StoreResult<()> {
        // AUTOINCREMENT keeps ids of deleted rows from being handed out again
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (amount > 0),
                category TEXT NOT NULL,
                payment_method TEXT NOT NULL
                    CHECK (payment_method IN ('cash', 'credit_card', 'debit_card')),
                date TEXT NOT NULL,
                description TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_expenses_date
            ON expenses(date DESC);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_expenses_category
            ON expenses(category);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
