// api/mod.rs - Auth API Surface
// Small axum router served next to the Discord client. Currently a single
// route: the osu! OAuth login/link endpoint.

pub mod osu_login;
pub mod state_token;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use sqlx::SqlitePool;

use crate::config::OsuConfig;
use crate::osu::OsuApi;

/// Shared state of the auth API handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub osu_api: Arc<dyn OsuApi>,
    pub osu_config: OsuConfig,
    pub base_url: String,
    pub secret_key: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(osu_login::LOGIN_PATH, get(osu_login::osu_login))
        .with_state(state)
}
