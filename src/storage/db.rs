use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, SqlitePool};
use thiserror::Error;

use super::tables::QueryTable;
use crate::ingest::Dataset;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("connection error: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("query error: {0}")]
    Query(#[from] sqlx::Error),
}

/// One result row as a column-name → value mapping. All uploaded columns
/// have TEXT affinity, so values are strings; SQL NULL maps to JSON null.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Owns the SQLite connection pool. Cheap to clone; constructed once at
/// startup and closed by whoever constructed it.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database at `url`.
    ///
    /// `url` should be a sqlx-compatible SQLite URL, e.g.
    /// `"sqlite://oath-speaker.db?mode=rwc"` or `"sqlite::memory:"`.
    pub async fn connect(url: &str) -> Result<Self, DatabaseError> {
        let pool = SqlitePoolOptions::new()
            .connect(url)
            .await
            .map_err(DatabaseError::Connect)?;
        Ok(Self { pool })
    }

    /// Close the pool, waiting for in-flight connections to finish.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ========================================================================
    // Table operations
    // ========================================================================

    /// Load a dataset into its destination table, replacing any existing
    /// table of that name — contents and schema both. Runs as a single
    /// transaction: a failure mid-load rolls back and leaves whatever
    /// table previously held the name untouched.
    ///
    /// Returns the number of rows written.
    pub async fn replace_table(&self, dataset: &Dataset) -> Result<u64, DatabaseError> {
        let table = quote_ident(&dataset.table);
        let columns = dataset
            .columns
            .iter()
            .map(|c| format!("{} TEXT", quote_ident(c)))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=dataset.columns.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let insert = format!("INSERT INTO {table} VALUES ({placeholders})");

        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&format!("CREATE TABLE {table} ({columns})"))
            .execute(&mut *tx)
            .await?;

        let mut written = 0u64;
        for row in &dataset.rows {
            let mut query = sqlx::query(&insert);
            for value in row {
                query = query.bind(value);
            }
            written += query.execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    /// Fetch every row of `table` whose status column equals `status`.
    /// The status value is bound as a parameter; the table identifier comes
    /// from the closed set, not from the caller.
    pub async fn select_by_status(
        &self,
        table: QueryTable,
        status: &str,
    ) -> Result<Vec<Record>, DatabaseError> {
        let rows = sqlx::query(table.select_by_status_sql())
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_record).collect()
    }

    /// Whether a table with this exact name currently exists.
    pub async fn table_exists(&self, name: &str) -> Result<bool, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }
}

/// Double-quote an identifier for SQLite, escaping embedded quotes.
fn quote_ident(raw: &str) -> String {
    format!("\"{}\"", raw.replace('"', "\"\""))
}

fn row_to_record(row: &SqliteRow) -> Result<Record, DatabaseError> {
    let mut record = Record::new();
    for (i, column) in row.columns().iter().enumerate() {
        let value: Option<String> = row.try_get(i)?;
        record.insert(
            column.name().to_string(),
            match value {
                Some(text) => serde_json::Value::String(text),
                None => serde_json::Value::Null,
            },
        );
    }
    Ok(record)
}
