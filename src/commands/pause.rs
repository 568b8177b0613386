// pause.rs - Pause/Resume Command Module
// This module implements the ^pause command (also reachable as ^resume), which
// forwards a discord_pause herald event to the playback frontend and reports
// what it did.
//
// Used by: main.rs (command registration)

use log::{info, warn};
use serenity::{
    client::Context,
    framework::standard::{macros::command, Args, CommandResult},
    model::channel::Message,
};

use crate::error::PackError;
use crate::herald::{HeraldClient, PauseAction};

/// Forward the pause toggle and turn the typed response into the reply text.
pub async fn pause_reply(
    herald: &dyn HeraldClient,
    guild_id: Option<u64>,
) -> Result<String, PackError> {
    let response = herald.discord_pause(guild_id).await?;

    Ok(match response.action {
        PauseAction::Paused => "⏸ Playback paused.".to_string(),
        PauseAction::Resumed => "▶️ Playback resumed!".to_string(),
    })
}

#[command]
#[aliases("resume")]
/// Main ^pause command handler
/// Toggles playback in the voice frontend through the herald
/// Supports:
///   - ^pause
///   - ^resume
pub async fn pause(ctx: &Context, msg: &Message, _args: Args) -> CommandResult {
    let guild_id = msg.guild_id.map(|g| g.0);
    info!("⏯ Pause toggle requested by {} (guild: {:?})", msg.author.name, guild_id);

    let herald = {
        let data = ctx.data.read().await;
        data.get::<crate::HeraldClientKey>()
            .cloned()
            .ok_or("herald client missing from TypeMap")?
    };

    match pause_reply(herald.as_ref(), guild_id).await {
        Ok(reply) => {
            msg.reply(ctx, reply).await?;
        }
        Err(e) => {
            warn!("❌ Pause toggle failed: {}", e);
            msg.reply(ctx, format!("⚠️ {}", e)).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::herald::PauseResponse;
    use async_trait::async_trait;

    struct FakeHerald {
        action: PauseAction,
        seen_guild: std::sync::Mutex<Option<Option<u64>>>,
    }

    #[async_trait]
    impl HeraldClient for FakeHerald {
        async fn discord_pause(
            &self,
            guild_id: Option<u64>,
        ) -> Result<PauseResponse, PackError> {
            *self.seen_guild.lock().unwrap() = Some(guild_id);
            Ok(PauseResponse { action: self.action })
        }
    }

    #[tokio::test]
    async fn test_paused_reply_contains_paused() {
        let herald = FakeHerald {
            action: PauseAction::Paused,
            seen_guild: std::sync::Mutex::new(None),
        };
        let reply = pause_reply(&herald, Some(1234)).await.unwrap();
        assert!(reply.contains("paused"));
        assert_eq!(*herald.seen_guild.lock().unwrap(), Some(Some(1234)));
    }

    #[tokio::test]
    async fn test_resumed_reply_contains_resumed() {
        let herald = FakeHerald {
            action: PauseAction::Resumed,
            seen_guild: std::sync::Mutex::new(None),
        };
        let reply = pause_reply(&herald, None).await.unwrap();
        assert!(reply.contains("resumed"));
        assert_eq!(*herald.seen_guild.lock().unwrap(), Some(None));
    }
}
