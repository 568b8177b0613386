// token.rs - Login Token Row
// Random bearer tokens handed out after a successful external login. Every
// token has a bounded lifetime fixed at generation.

use chrono::{Duration, NaiveDateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::PackError;

pub const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS tokens (
    token      TEXT PRIMARY KEY,
    user_id    INTEGER NOT NULL REFERENCES users(id),
    expiration DATETIME NOT NULL
)";

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LoginToken {
    pub token: String,
    pub user_id: i64,
    pub expiration: NaiveDateTime,
}

impl LoginToken {
    /// Create and persist a fresh token for a user, valid for `lifetime`.
    pub async fn generate(
        pool: &SqlitePool,
        user_id: i64,
        lifetime: Duration,
    ) -> Result<LoginToken, PackError> {
        let token = LoginToken {
            token: Uuid::new_v4().simple().to_string(),
            user_id,
            expiration: Utc::now().naive_utc() + lifetime,
        };

        sqlx::query("INSERT INTO tokens (token, user_id, expiration) VALUES (?, ?, ?)")
            .bind(&token.token)
            .bind(token.user_id)
            .bind(token.expiration)
            .execute(pool)
            .await?;

        Ok(token)
    }

    /// Look up a token that is still valid at `now`.
    pub async fn find_valid(
        pool: &SqlitePool,
        token: &str,
        now: NaiveDateTime,
    ) -> Result<Option<LoginToken>, PackError> {
        let row = sqlx::query_as::<_, LoginToken>(
            "SELECT token, user_id, expiration FROM tokens WHERE token = ? AND expiration > ?",
        )
        .bind(token)
        .bind(now)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expiration <= now
    }

    /// The JSON body returned to a freshly logged-in user.
    pub fn as_json(&self) -> serde_json::Value {
        serde_json::json!({
            "user_id": self.user_id,
            "token": self.token,
            "expiration": self.expiration.format("%Y-%m-%dT%H:%M:%S").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{self, user::User};

    #[tokio::test]
    async fn test_generate_has_bounded_lifetime() {
        let pool = tables::test_pool().await;
        User::insert(&pool, 1, "steffo").await.unwrap();

        let token = LoginToken::generate(&pool, 1, Duration::days(7)).await.unwrap();
        let now = Utc::now().naive_utc();

        assert!(!token.is_expired(now));
        assert!(token.is_expired(now + Duration::days(8)));
        assert!(!token.token.is_empty());
    }

    #[tokio::test]
    async fn test_find_valid_respects_expiration() {
        let pool = tables::test_pool().await;
        User::insert(&pool, 1, "steffo").await.unwrap();
        let token = LoginToken::generate(&pool, 1, Duration::days(7)).await.unwrap();

        let now = Utc::now().naive_utc();
        let found = LoginToken::find_valid(&pool, &token.token, now).await.unwrap();
        assert_eq!(found, Some(token.clone()));

        let later = now + Duration::days(8);
        let stale = LoginToken::find_valid(&pool, &token.token, later).await.unwrap();
        assert_eq!(stale, None);
    }

    #[tokio::test]
    async fn test_tokens_are_distinct() {
        let pool = tables::test_pool().await;
        User::insert(&pool, 1, "steffo").await.unwrap();

        let a = LoginToken::generate(&pool, 1, Duration::days(7)).await.unwrap();
        let b = LoginToken::generate(&pool, 1, Duration::days(7)).await.unwrap();
        assert_ne!(a.token, b.token);
    }

    #[tokio::test]
    async fn test_json_shape() {
        let pool = tables::test_pool().await;
        User::insert(&pool, 1, "steffo").await.unwrap();
        let token = LoginToken::generate(&pool, 1, Duration::days(7)).await.unwrap();

        let json = token.as_json();
        assert_eq!(json["user_id"], 1);
        assert_eq!(json["token"], token.token.as_str());
        assert!(json["expiration"].is_string());
    }
}
