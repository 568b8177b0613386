// osu.rs - osu! API Client
// OAuth code exchange against the osu! token endpoint plus the authenticated
// profile lookup used to learn who just logged in. The client is a trait so
// the login endpoint can be exercised with a scripted fake.
//
// Used by: api/osu_login.rs, main.rs (client construction)

use async_trait::async_trait;
use log::{info, warn};
use serde::Deserialize;

use crate::error::PackError;

const OSU_TOKEN_URL: &str = "https://osu.ppy.sh/oauth/token";
const OSU_ME_URL: &str = "https://osu.ppy.sh/api/v2/me/";

/// Token set returned by a successful OAuth code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct OsuTokenSet {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires.
    pub expires_in: i64,
}

/// The subset of `/api/v2/me/` the pack cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct OsuProfile {
    pub id: i64,
    pub username: String,
}

#[async_trait]
pub trait OsuApi: Send + Sync {
    /// Exchange an authorization code for a token set.
    async fn exchange_code(&self, code: &str, redirect_uri: &str)
        -> Result<OsuTokenSet, PackError>;

    /// Fetch the profile of the user the access token belongs to.
    async fn me(&self, access_token: &str) -> Result<OsuProfile, PackError>;
}

/// osu! client backed by reqwest.
pub struct HttpOsuClient {
    client_id: String,
    client_secret: String,
    http: reqwest::Client,
}

impl HttpOsuClient {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl OsuApi for HttpOsuClient {
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<OsuTokenSet, PackError> {
        info!("🔑 Exchanging osu! OAuth code");
        let response = self
            .http
            .post(OSU_TOKEN_URL)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("❌ osu! token exchange rejected: {}", response.status());
            return Err(PackError::forbidden(
                "osu! API returned an error in the OAuth token exchange",
            ));
        }

        Ok(response.json::<OsuTokenSet>().await?)
    }

    async fn me(&self, access_token: &str) -> Result<OsuProfile, PackError> {
        let response = self
            .http
            .get(OSU_ME_URL)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PackError::upstream(format!(
                "osu! profile lookup failed with status {}",
                response.status()
            )));
        }

        Ok(response.json::<OsuProfile>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_set_parses_osu_response() {
        let body = r#"{
            "token_type": "Bearer",
            "expires_in": 86400,
            "access_token": "aaa",
            "refresh_token": "bbb"
        }"#;
        let tokens: OsuTokenSet = serde_json::from_str(body).unwrap();
        assert_eq!(tokens.access_token, "aaa");
        assert_eq!(tokens.refresh_token, "bbb");
        assert_eq!(tokens.expires_in, 86400);
    }

    #[test]
    fn test_profile_ignores_extra_fields() {
        let body = r#"{"id": 124493, "username": "Cookiezi", "country_code": "KR"}"#;
        let profile: OsuProfile = serde_json::from_str(body).unwrap();
        assert_eq!(profile.id, 124493);
        assert_eq!(profile.username, "Cookiezi");
    }
}
