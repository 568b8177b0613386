// osu_login.rs - osu! OAuth Login/Link Endpoint
// GET /api/auth/login/osu/v1?code=...&state=...
//
// Two flows share the endpoint:
// - With `state` (issued by the link command, signed with the instance
//   secret): exchange the code, fetch the osu! profile, and create a new link
//   row for the user named in the state.
// - Without `state`: exchange the code, fetch the profile, and log in through
//   the existing link row for that osu! id.
// Either way a login token is only issued if osu! login is enabled for the
// instance.
//
// Used by: api/mod.rs (route registration)

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use log::{info, warn};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::api::state_token;
use crate::api::AppState;
use crate::config::OsuConfig;
use crate::error::PackError;
use crate::osu::OsuApi;
use crate::tables::osu::{NewOsu, Osu};
use crate::tables::token::LoginToken;
use crate::tables::user::User;

pub const LOGIN_PATH: &str = "/api/auth/login/osu/v1";

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// The code returned by the osu! API.
    pub code: String,
    /// The state payload generated by the osu! link command. If missing, just
    /// login.
    pub state: Option<String>,
}

/// The whole login/link flow, independent of the web framework so tests can
/// drive it with a scripted osu! client.
pub async fn login_with_osu(
    pool: &SqlitePool,
    osu_api: &dyn OsuApi,
    osu_config: &OsuConfig,
    base_url: &str,
    secret_key: &str,
    code: &str,
    state: Option<&str>,
) -> Result<serde_json::Value, PackError> {
    // A state payload names the local user who asked to link a new account.
    let linking_user = match state {
        Some(state) => {
            let uid = state_token::verify(state, secret_key)?;
            let user = User::find(pool, uid)
                .await?
                .ok_or_else(|| PackError::forbidden("Unknown user in state payload"))?;
            Some(user)
        }
        None => None,
    };

    let redirect_uri = format!("{}{}", base_url, LOGIN_PATH);
    let tokens = osu_api.exchange_code(code, &redirect_uri).await?;
    let profile = osu_api.me(&tokens.access_token).await?;

    let user = match linking_user {
        Some(user) => {
            info!("🔗 Linking osu! account {} to user {}", profile.username, user.id);
            Osu::insert(
                pool,
                NewOsu {
                    user_id: user.id,
                    access_token: tokens.access_token,
                    refresh_token: tokens.refresh_token,
                    expiration_date: Utc::now().naive_utc()
                        + Duration::seconds(tokens.expires_in),
                    osu_id: profile.id,
                    username: profile.username,
                },
            )
            .await?;
            user
        }
        None => {
            let link = Osu::find_by_osu_id(pool, profile.id)
                .await?
                .ok_or_else(|| PackError::forbidden("Unknown osu! account"))?;
            User::find(pool, link.user_id)
                .await?
                .ok_or_else(|| PackError::forbidden("Unknown osu! account"))?
        }
    };

    if !osu_config.login_enabled {
        warn!("🚫 osu! login is disabled, refusing to issue a token for user {}", user.id);
        return Err(PackError::forbidden(
            "Account linked successfully; cannot use this account to generate a login token, \
             as osu! login is currently disabled on this instance.",
        ));
    }

    let token = LoginToken::generate(pool, user.id, Duration::days(7)).await?;
    info!("✅ Issued login token for user {} via osu!", user.id);
    Ok(token.as_json())
}

/// Axum handler wrapping `login_with_osu` with the shared state.
pub async fn osu_login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Json<serde_json::Value>, PackError> {
    let json = login_with_osu(
        &state.pool,
        state.osu_api.as_ref(),
        &state.osu_config,
        &state.base_url,
        &state.secret_key,
        &query.code,
        query.state.as_deref(),
    )
    .await?;
    Ok(Json(json))
}
