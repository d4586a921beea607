use async_trait::async_trait;
use sqlx::PgPool;

use super::ListRepository;
use crate::error::{EngineError, Result};
use crate::model::{CidrEntry, ListName};

/// `ListRepository` backed by two fixed Postgres tables, `whitelist` and
/// `blacklist`, each `(id bigserial, network text, mask integer)` with a
/// unique constraint on `(network, mask)`.
///
/// `network` is `TEXT`, not `INET`/`CIDR` — native address types
/// normalize host bits on insert, and the wire contract promises entries
/// come back exactly as submitted.
pub struct PostgresListRepository {
    pool: PgPool,
}

impl PostgresListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn table(list: ListName) -> &'static str {
        match list {
            ListName::Whitelist => "whitelist",
            ListName::Blacklist => "blacklist",
        }
    }
}

#[async_trait]
impl ListRepository for PostgresListRepository {
    #[tracing::instrument(skip(self), fields(list = %list))]
    async fn add(&self, list: ListName, network: &str, mask: i32) -> Result<i64> {
        let query = format!(
            "INSERT INTO {} (network, mask) VALUES ($1, $2) RETURNING id",
            Self::table(list)
        );
        let row: Result<(i64,), sqlx::Error> =
            sqlx::query_as(&query).bind(network).bind(mask).fetch_one(&self.pool).await;

        match row {
            Ok((id,)) => Ok(id),
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint().map(|c| c.contains("network")).unwrap_or(false) =>
            {
                Err(EngineError::DuplicateEntry)
            }
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self), fields(list = %list))]
    async fn remove(&self, list: ListName, network: &str, mask: i32) -> Result<()> {
        let query = format!("DELETE FROM {} WHERE network = $1 AND mask = $2", Self::table(list));
        let result = sqlx::query(&query).bind(network).bind(mask).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(EngineError::NotFound);
        }
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(list = %list))]
    async fn contains(&self, list: ListName, network: &str, mask: i32) -> Result<bool> {
        let query =
            format!("SELECT id FROM {} WHERE network = $1 AND mask = $2", Self::table(list));
        let row: Option<(i64,)> =
            sqlx::query_as(&query).bind(network).bind(mask).fetch_optional(&self.pool).await?;
        Ok(row.is_some())
    }

    #[tracing::instrument(skip(self), fields(list = %list))]
    async fn list(&self, list: ListName) -> Result<Vec<CidrEntry>> {
        let query = format!("SELECT id, network, mask FROM {} ORDER BY id ASC", Self::table(list));
        let rows: Vec<(i64, String, i32)> = sqlx::query_as(&query).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(id, network, mask)| CidrEntry { id, network, mask }).collect())
    }
}
