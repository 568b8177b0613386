// fiorygi.rs - Fiorygi Transaction Ledger Row
// Append-only ledger of fiorygi (instance currency) changes. Rows are inserted
// and listed, never mutated; a user's balance is the sum of their changes.

use chrono::{NaiveDateTime, Utc};
use sqlx::SqlitePool;

use crate::error::PackError;

pub const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS fiorygi_transactions (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id   INTEGER NOT NULL REFERENCES users(id),
    change    INTEGER NOT NULL,
    reason    TEXT NOT NULL,
    timestamp DATETIME NOT NULL
)";

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FiorygiTransaction {
    pub id: i64,
    pub user_id: i64,
    pub change: i64,
    pub reason: String,
    pub timestamp: NaiveDateTime,
}

impl FiorygiTransaction {
    pub async fn insert(
        pool: &SqlitePool,
        user_id: i64,
        change: i64,
        reason: &str,
    ) -> Result<FiorygiTransaction, PackError> {
        let row = sqlx::query_as::<_, FiorygiTransaction>(
            "INSERT INTO fiorygi_transactions (user_id, change, reason, timestamp)
             VALUES (?, ?, ?, ?)
             RETURNING id, user_id, change, reason, timestamp",
        )
        .bind(user_id)
        .bind(change)
        .bind(reason)
        .bind(Utc::now().naive_utc())
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    /// All transactions of a user, newest first.
    pub async fn list_for_user(
        pool: &SqlitePool,
        user_id: i64,
    ) -> Result<Vec<FiorygiTransaction>, PackError> {
        let rows = sqlx::query_as::<_, FiorygiTransaction>(
            "SELECT id, user_id, change, reason, timestamp
             FROM fiorygi_transactions WHERE user_id = ?
             ORDER BY timestamp DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Sum of all changes of a user.
    pub async fn balance(pool: &SqlitePool, user_id: i64) -> Result<i64, PackError> {
        let (balance,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(change), 0) FROM fiorygi_transactions WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(balance)
    }
}
