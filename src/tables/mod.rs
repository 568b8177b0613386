// tables/mod.rs - Database Table Registry
// One module per table, each exposing a plain row struct, its repository
// functions and its CREATE TABLE statement. `create_all` is the registry:
// enter the tables of the pack there and the schema gets created in order.

pub mod fiorygi;
pub mod osu;
pub mod token;
pub mod user;

use sqlx::SqlitePool;

use crate::error::PackError;

/// Every table of the pack, in creation order (referenced tables first).
const ALL_TABLES: &[&str] = &[
    user::CREATE_TABLE,
    osu::CREATE_TABLE,
    token::CREATE_TABLE,
    fiorygi::CREATE_TABLE,
];

/// Create the schema for every registered table.
pub async fn create_all(pool: &SqlitePool) -> Result<(), PackError> {
    for statement in ALL_TABLES {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Fresh in-memory database with the full schema, for tests.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    create_all(&pool).await.expect("schema creation");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_all_is_idempotent() {
        let pool = test_pool().await;
        create_all(&pool).await.unwrap();
        create_all(&pool).await.unwrap();
    }
}
