// funkwhale.rs - Lazy Funkwhale Playlist Command Module
// This module implements the ^lazyfunkwhaleplaylist command, which searches the
// configured Funkwhale instance for a playlist and replies with the listen URLs
// of its tracks so they can be queued lazily in voice chat.
//
// Key Features:
// - Searches playlists by name, newest matching playlist wins
// - Replies with the ordered track listen-URL list
// - Zero matches abort before the tracks endpoint is ever called
//
// Used by: main.rs (command registration)

use async_trait::async_trait;
use log::{info, warn};
use serde::Deserialize;
use serenity::{
    client::Context,
    framework::standard::{macros::command, Args, CommandResult},
    model::channel::Message,
};

use crate::error::PackError;

/// One playlist from the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    pub id: u64,
    pub name: String,
}

/// One entry of a playlist's track listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrack {
    pub track: Track,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub listen_url: String,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistSearchPage {
    pub results: Vec<Playlist>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistTracksPage {
    pub results: Vec<PlaylistTrack>,
}

/// The two Funkwhale endpoints the command needs, behind a trait so tests can
/// script the responses.
#[async_trait]
pub trait FunkwhaleApi: Send + Sync {
    /// Search playable playlists by name, newest first.
    async fn search_playlists(&self, query: &str) -> Result<Vec<Playlist>, PackError>;

    /// List the tracks of a playlist in playlist order.
    async fn playlist_tracks(&self, playlist_id: u64) -> Result<Vec<PlaylistTrack>, PackError>;
}

/// Funkwhale client backed by reqwest.
pub struct HttpFunkwhaleClient {
    instance_url: String,
    http: reqwest::Client,
}

impl HttpFunkwhaleClient {
    pub fn new(instance_url: String) -> Self {
        Self {
            instance_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl FunkwhaleApi for HttpFunkwhaleClient {
    async fn search_playlists(&self, query: &str) -> Result<Vec<Playlist>, PackError> {
        let url = format!("{}/api/v1/playlists/", self.instance_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("ordering", "-creation_date"),
                ("playable", "true"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PackError::upstream(format!(
                "playlist search failed with status {}",
                response.status()
            )));
        }

        Ok(response.json::<PlaylistSearchPage>().await?.results)
    }

    async fn playlist_tracks(&self, playlist_id: u64) -> Result<Vec<PlaylistTrack>, PackError> {
        let url = format!("{}/api/v1/playlists/{}/tracks", self.instance_url, playlist_id);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(PackError::upstream(format!(
                "playlist tracks lookup failed with status {}",
                response.status()
            )));
        }

        Ok(response.json::<PlaylistTracksPage>().await?.results)
    }
}

/// Resolve a search term to the newest matching playlist and the listen URLs
/// of its tracks. The tracks endpoint is only hit after a successful match.
pub async fn lazy_playlist_urls(
    api: &dyn FunkwhaleApi,
    instance_url: &str,
    query: &str,
) -> Result<(String, Vec<String>), PackError> {
    let playlists = api.search_playlists(query).await?;

    let playlist = playlists
        .into_iter()
        .next()
        .ok_or_else(|| PackError::user("No playlist found with that name."))?;

    let tracks = api.playlist_tracks(playlist.id).await?;
    let urls = tracks
        .into_iter()
        .map(|t| format!("{}{}", instance_url, t.track.listen_url))
        .collect();

    Ok((playlist.name, urls))
}

#[command]
#[aliases("lfwp", "lfwplaylist", "lazyfunkwhalep")]
/// Main ^lazyfunkwhaleplaylist command handler
/// Searches the configured Funkwhale instance and replies with the track
/// listen URLs of the newest matching playlist
/// Supports:
///   - ^lazyfunkwhaleplaylist <search>
pub async fn lazyfunkwhaleplaylist(ctx: &Context, msg: &Message, args: Args) -> CommandResult {
    let query = args.message().trim().to_string();
    if query.is_empty() {
        msg.reply(ctx, "Please provide a playlist name!\n\n**Usage:** `^lazyfunkwhaleplaylist <search>`")
            .await?;
        return Ok(());
    }

    info!("🎵 Funkwhale playlist search for '{}' by {}", query, msg.author.name);

    let (api, instance_url) = {
        let data = ctx.data.read().await;
        let api = data
            .get::<crate::FunkwhaleClientKey>()
            .cloned()
            .ok_or("Funkwhale client missing from TypeMap")?;
        let config = data
            .get::<crate::ConfigKey>()
            .cloned()
            .ok_or("config missing from TypeMap")?;
        (api, config.funkwhale.instance_url.clone())
    };

    match lazy_playlist_urls(api.as_ref(), &instance_url, &query).await {
        Ok((name, urls)) => {
            let reply = format!("🎶 **{}**\n{}", name, urls.join("\n"));
            msg.reply(ctx, reply).await?;
        }
        Err(e) => {
            warn!("❌ Funkwhale playlist lookup failed: {}", e);
            msg.reply(ctx, format!("⚠️ {}", e)).await?;
        }
    }

    Ok(())
}
