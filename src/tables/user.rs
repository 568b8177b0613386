// user.rs - Local User Row
// Mirror of the host framework's user table; the pack only reads it to attach
// link rows and tokens to someone.

use sqlx::SqlitePool;

use crate::error::PackError;

pub const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS users (
    id       INTEGER PRIMARY KEY,
    username TEXT NOT NULL
)";

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
}

impl User {
    pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<User>, PackError> {
        let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn insert(pool: &SqlitePool, id: i64, username: &str) -> Result<User, PackError> {
        sqlx::query("INSERT INTO users (id, username) VALUES (?, ?)")
            .bind(id)
            .bind(username)
            .execute(pool)
            .await?;
        Ok(User {
            id,
            username: username.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables;

    #[tokio::test]
    async fn test_find_round_trip() {
        let pool = tables::test_pool().await;
        User::insert(&pool, 1, "steffo").await.unwrap();

        let found = User::find(&pool, 1).await.unwrap();
        assert_eq!(found, Some(User { id: 1, username: "steffo".into() }));

        let missing = User::find(&pool, 2).await.unwrap();
        assert_eq!(missing, None);
    }
}
