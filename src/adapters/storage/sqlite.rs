use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{FromRow, Pool, Sqlite};

use crate::domain::model::FavoriteRecord;
use crate::domain::ports::FavoriteStore;
use crate::utils::error::{StoreError, StoreResult};

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed store. The `(owner_id, country_code)` unique index is the
/// authority on duplicates, so any number of handles or processes may share
/// one database file.
#[derive(Debug, Clone)]
pub struct SqliteFavoriteStore {
    pool: Pool<Sqlite>,
}

#[derive(Debug, FromRow)]
struct FavoriteRow {
    owner_id: String,
    country_code: String,
    name: String,
    flag: String,
    created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for FavoriteRecord {
    fn from(row: FavoriteRow) -> Self {
        Self {
            owner_id: row.owner_id,
            country_code: row.country_code,
            name: row.name,
            flag: row.flag,
            created_at: row.created_at,
        }
    }
}

impl SqliteFavoriteStore {
    /// 開啟（必要時建立）資料庫檔案並套用 schema
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::info!("📂 Opening favorites database at {}", path.display());

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.apply_schema().await?;
        Ok(store)
    }

    async fn apply_schema(&self) -> StoreResult<()> {
        let schema = include_str!("schema.sql");

        for statement in schema.split(';') {
            let stmt = statement.trim();
            if !stmt.is_empty() {
                sqlx::query(stmt).execute(&self.pool).await?;
            }
        }

        tracing::debug!("✅ Favorites schema ready");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl FavoriteStore for SqliteFavoriteStore {
    async fn find_by_owner(&self, owner_id: &str) -> StoreResult<Vec<FavoriteRecord>> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            "SELECT owner_id, country_code, name, flag, created_at
             FROM favorites WHERE owner_id = ? ORDER BY id ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FavoriteRecord::from).collect())
    }

    async fn find_one(
        &self,
        owner_id: &str,
        country_code: &str,
    ) -> StoreResult<Option<FavoriteRecord>> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            "SELECT owner_id, country_code, name, flag, created_at
             FROM favorites WHERE owner_id = ? AND country_code = ?",
        )
        .bind(owner_id)
        .bind(country_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(FavoriteRecord::from))
    }

    async fn insert(&self, record: FavoriteRecord) -> StoreResult<FavoriteRecord> {
        let result = sqlx::query(
            "INSERT INTO favorites (owner_id, country_code, name, flag, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&record.owner_id)
        .bind(&record.country_code)
        .bind(&record.name)
        .bind(&record.flag)
        .bind(record.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(record),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::ConstraintViolation {
                    owner_id: record.owner_id,
                    country_code: record.country_code,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_one(&self, owner_id: &str, country_code: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE owner_id = ? AND country_code = ?")
            .bind(owner_id)
            .bind(country_code)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
