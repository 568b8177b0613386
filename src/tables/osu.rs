// osu.rs - osu! Account Link Row
// Associates a local user with an osu! identity and holds the OAuth tokens
// obtained when the link was made. The osu! id is unique within the table, so
// login lookups are single-row.

use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use crate::error::PackError;

pub const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS osu (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id         INTEGER NOT NULL REFERENCES users(id),
    access_token    TEXT NOT NULL,
    refresh_token   TEXT NOT NULL,
    expiration_date DATETIME NOT NULL,
    osu_id          INTEGER NOT NULL UNIQUE,
    username        TEXT NOT NULL
)";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Osu {
    pub id: i64,
    pub user_id: i64,
    pub access_token: String,
    pub refresh_token: String,
    /// When the access token stops working.
    pub expiration_date: NaiveDateTime,
    pub osu_id: i64,
    pub username: String,
}

/// Field set for a new link row, built from a token exchange plus a profile
/// lookup.
#[derive(Debug, Clone)]
pub struct NewOsu {
    pub user_id: i64,
    pub access_token: String,
    pub refresh_token: String,
    pub expiration_date: NaiveDateTime,
    pub osu_id: i64,
    pub username: String,
}

impl Osu {
    pub async fn insert(pool: &SqlitePool, new: NewOsu) -> Result<Osu, PackError> {
        let row = sqlx::query_as::<_, Osu>(
            "INSERT INTO osu (user_id, access_token, refresh_token, expiration_date, osu_id, username)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id, user_id, access_token, refresh_token, expiration_date, osu_id, username",
        )
        .bind(new.user_id)
        .bind(&new.access_token)
        .bind(&new.refresh_token)
        .bind(new.expiration_date)
        .bind(new.osu_id)
        .bind(&new.username)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    /// Single-row lookup by external identity.
    pub async fn find_by_osu_id(pool: &SqlitePool, osu_id: i64) -> Result<Option<Osu>, PackError> {
        let row = sqlx::query_as::<_, Osu>(
            "SELECT id, user_id, access_token, refresh_token, expiration_date, osu_id, username
             FROM osu WHERE osu_id = ?",
        )
        .bind(osu_id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: i64,
    ) -> Result<Option<Osu>, PackError> {
        let row = sqlx::query_as::<_, Osu>(
            "SELECT id, user_id, access_token, refresh_token, expiration_date, osu_id, username
             FROM osu WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{self, user::User};
    use chrono::{Duration, Utc};

    fn new_link(user_id: i64, osu_id: i64) -> NewOsu {
        NewOsu {
            user_id,
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expiration_date: Utc::now().naive_utc() + Duration::seconds(86400),
            osu_id,
            username: "peppy".into(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup_by_osu_id() {
        let pool = tables::test_pool().await;
        User::insert(&pool, 1, "steffo").await.unwrap();

        let inserted = Osu::insert(&pool, new_link(1, 2)).await.unwrap();
        assert_eq!(inserted.user_id, 1);
        assert_eq!(inserted.osu_id, 2);

        let found = Osu::find_by_osu_id(&pool, 2).await.unwrap().unwrap();
        assert_eq!(found.username, "peppy");
        assert_eq!(found.refresh_token, "refresh");

        assert!(Osu::find_by_osu_id(&pool, 99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_osu_id_is_unique() {
        let pool = tables::test_pool().await;
        User::insert(&pool, 1, "steffo").await.unwrap();
        User::insert(&pool, 2, "viktya").await.unwrap();

        Osu::insert(&pool, new_link(1, 2)).await.unwrap();
        let duplicate = Osu::insert(&pool, new_link(2, 2)).await;
        assert!(matches!(duplicate, Err(PackError::Database(_))));
    }

    #[tokio::test]
    async fn test_lookup_by_user_id() {
        let pool = tables::test_pool().await;
        User::insert(&pool, 1, "steffo").await.unwrap();
        Osu::insert(&pool, new_link(1, 2)).await.unwrap();

        let found = Osu::find_by_user_id(&pool, 1).await.unwrap().unwrap();
        assert_eq!(found.osu_id, 2);
    }
}
