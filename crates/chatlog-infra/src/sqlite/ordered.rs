//! SQLite sorted-set store implementation.
//!
//! Implements `OrderedStore` from `chatlog-core` on the `sorted_set_members`
//! table. Rank windows are `ORDER BY score, member` with LIMIT/OFFSET, so the
//! tie-break between equal scores is the byte order of the stored members.

use chatlog_core::store::{OrderedStore, RangeOrder};
use chatlog_types::error::StoreError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `OrderedStore`.
pub struct SqliteOrderedStore {
    pool: DatabasePool,
}

impl SqliteOrderedStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Connection-level failures mean the store is unreachable; everything else
/// is a failed operation.
fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Unavailable(err.to_string())
        }
        other => StoreError::Operation(other.to_string()),
    }
}

impl OrderedStore for SqliteOrderedStore {
    async fn add(&self, key: &str, score: i64, member: Vec<u8>) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO sorted_set_members (set_key, score, member)
               VALUES (?, ?, ?)
               ON CONFLICT (set_key, member) DO UPDATE SET score = excluded.score"#,
        )
        .bind(key)
        .bind(score)
        .bind(member)
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn range(
        &self,
        key: &str,
        start: u64,
        stop: u64,
        order: RangeOrder,
    ) -> Result<Vec<Vec<u8>>, StoreError> {
        if start > stop {
            return Ok(Vec::new());
        }
        let Ok(offset) = i64::try_from(start) else {
            return Ok(Vec::new());
        };
        let limit = i64::try_from(stop - start)
            .unwrap_or(i64::MAX)
            .saturating_add(1);

        let sql = match order {
            RangeOrder::Asc => {
                "SELECT member FROM sorted_set_members WHERE set_key = ? \
                 ORDER BY score ASC, member ASC LIMIT ? OFFSET ?"
            }
            RangeOrder::Desc => {
                "SELECT member FROM sorted_set_members WHERE set_key = ? \
                 ORDER BY score DESC, member DESC LIMIT ? OFFSET ?"
            }
        };

        let rows = sqlx::query(sql)
            .bind(key)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        let mut members = Vec::with_capacity(rows.len());
        for row in &rows {
            let member: Vec<u8> = row.try_get("member").map_err(map_sqlx_error)?;
            members.push(member);
        }

        Ok(members)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
