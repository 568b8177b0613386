// herald.rs - Herald Event Client
// The herald is the cross-process event bus used to coordinate multiple bot
// frontends. This module exposes it as a client trait with one method per
// named event and a typed response, so commands take the client by injection
// instead of reaching for an ambient interface object.
//
// Used by: commands/pause.rs, main.rs (client construction)

use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::PackError;

/// What the playback frontend did in response to a `discord_pause` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PauseAction {
    Paused,
    Resumed,
}

/// Typed response to the `discord_pause` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PauseResponse {
    pub action: PauseAction,
}

/// Client for named herald events. One method per event.
#[async_trait]
pub trait HeraldClient: Send + Sync {
    /// Ask the Discord playback frontend to toggle pause in the given guild.
    async fn discord_pause(&self, guild_id: Option<u64>) -> Result<PauseResponse, PackError>;
}

/// Wire format of an event submission to the herald gateway.
#[derive(Debug, Serialize)]
struct HeraldEnvelope<'a, T: Serialize> {
    event: &'a str,
    data: T,
}

#[derive(Debug, Serialize)]
struct DiscordPauseData {
    guild_id: Option<u64>,
}

/// Herald client that POSTs events as JSON to the configured gateway URL.
/// One request per event, no retry; a failed call fails the command.
pub struct HttpHeraldClient {
    url: String,
    http: reqwest::Client,
}

impl HttpHeraldClient {
    pub fn new(url: String) -> Self {
        Self {
            url,
            http: reqwest::Client::new(),
        }
    }

    async fn call<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        event: &str,
        data: T,
    ) -> Result<R, PackError> {
        info!("📡 Forwarding herald event '{}'", event);
        let response = self
            .http
            .post(&self.url)
            .json(&HeraldEnvelope { event, data })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PackError::upstream(format!(
                "herald event '{}' failed with status {}",
                event,
                response.status()
            )));
        }

        Ok(response.json::<R>().await?)
    }
}

#[async_trait]
impl HeraldClient for HttpHeraldClient {
    async fn discord_pause(&self, guild_id: Option<u64>) -> Result<PauseResponse, PackError> {
        self.call("discord_pause", DiscordPauseData { guild_id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_action_wire_names() {
        assert_eq!(serde_json::to_string(&PauseAction::Paused).unwrap(), "\"paused\"");
        assert_eq!(serde_json::to_string(&PauseAction::Resumed).unwrap(), "\"resumed\"");
    }

    #[test]
    fn test_pause_response_parses() {
        let response: PauseResponse = serde_json::from_str(r#"{"action":"resumed"}"#).unwrap();
        assert_eq!(response.action, PauseAction::Resumed);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result = serde_json::from_str::<PauseResponse>(r#"{"action":"stopped"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_envelope_shape() {
        let envelope = HeraldEnvelope {
            event: "discord_pause",
            data: DiscordPauseData { guild_id: Some(42) },
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["event"], "discord_pause");
        assert_eq!(json["data"]["guild_id"], 42);
    }
}
