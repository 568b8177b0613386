// main.rs - Royalpack Bot Entry Point
// Wires the pack together: loads royalconfig.txt, opens the database, starts
// the auth API server and connects the Discord client with every pack command
// registered.
//
// Key Features:
// - Typed configuration from royalconfig.txt
// - SQLite pool with the pack schema created at startup
// - Auth API (osu! OAuth login) served next to the Discord client
// - Shared clients handed to commands through the TypeMap
// - Graceful shutdown on Ctrl+C

mod api;
mod commands;
mod config;
mod error;
mod herald;
mod osu;
mod tables;
mod utils;

use std::str::FromStr;
use std::sync::Arc;

use serenity::{
    async_trait,
    client::{Client, Context, EventHandler},
    framework::standard::{macros::group, StandardFramework},
    model::gateway::Ready,
    prelude::{GatewayIntents, TypeMapKey},
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::signal;

use crate::commands::funkwhale::FunkwhaleApi;
use crate::config::PackConfig;
use crate::herald::HeraldClient;

// TypeMap key for the pack configuration
pub struct ConfigKey;
impl TypeMapKey for ConfigKey {
    type Value = Arc<PackConfig>;
}

// TypeMap key for the database pool
pub struct DbKey;
impl TypeMapKey for DbKey {
    type Value = SqlitePool;
}

// TypeMap key for the herald event client
pub struct HeraldClientKey;
impl TypeMapKey for HeraldClientKey {
    type Value = Arc<dyn HeraldClient>;
}

// TypeMap key for the Funkwhale API client
pub struct FunkwhaleClientKey;
impl TypeMapKey for FunkwhaleClientKey {
    type Value = Arc<dyn FunkwhaleApi>;
}

// Import all command constants generated by the #[command] macro
use crate::commands::funkwhale::LAZYFUNKWHALEPLAYLIST_COMMAND;
use crate::commands::pause::PAUSE_COMMAND;

// Command group declaration - includes all available commands
#[group]
#[commands(lazyfunkwhaleplaylist, pause)]
struct General;

// Event handler implementation
struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _: Context, ready: Ready) {
        println!("✅ Bot connected as {}!", ready.user.name);
    }
}

async fn open_database(database_url: &str) -> Result<SqlitePool, Box<dyn std::error::Error>> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    tables::create_all(&pool).await?;
    Ok(pool)
}

#[tokio::main]
async fn main() {
    // Initialize logger - must be done before any logging calls
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    // Load configuration from royalconfig.txt file
    let config = match PackConfig::load() {
        Ok(config) => Arc::new(config),
        Err(error) => {
            log::error!("❌ Failed to load royalconfig.txt: {}", error);
            eprintln!("❌ Failed to load royalconfig.txt: {}", error);
            eprintln!("Create a royalconfig.txt file in the project root with DISCORD_TOKEN, BASE_URL, SECRET_KEY, FUNKWHALE_INSTANCE_URL, OSU_CLIENT_ID, OSU_CLIENT_SECRET and HERALD_URL.");
            return;
        }
    };

    // Open the database and make sure the pack schema exists
    let pool = match open_database(&config.bot.database_url).await {
        Ok(pool) => {
            println!("✅ Database ready at {}", config.bot.database_url);
            pool
        }
        Err(e) => {
            log::error!("❌ Failed to open database: {}", e);
            eprintln!("❌ Failed to open database: {}", e);
            return;
        }
    };

    // Shared clients for the command handlers
    let herald_client: Arc<dyn HeraldClient> =
        Arc::new(herald::HttpHeraldClient::new(config.herald.url.clone()));
    let funkwhale_client: Arc<dyn FunkwhaleApi> = Arc::new(
        commands::funkwhale::HttpFunkwhaleClient::new(config.funkwhale.instance_url.clone()),
    );
    let osu_client: Arc<dyn osu::OsuApi> = Arc::new(osu::HttpOsuClient::new(
        config.osu.client_id.clone(),
        config.osu.client_secret.clone(),
    ));

    // Start the auth API server
    let api_state = api::AppState {
        pool: pool.clone(),
        osu_api: osu_client,
        osu_config: config.osu.clone(),
        base_url: config.bot.base_url.clone(),
        secret_key: config.bot.secret_key.clone(),
    };
    let api_bind = config.bot.api_bind.clone();
    let api_addr: std::net::SocketAddr = match api_bind.parse() {
        Ok(addr) => addr,
        Err(e) => {
            log::error!("❌ Invalid API_BIND address '{}': {}", api_bind, e);
            eprintln!("❌ Invalid API_BIND address '{}': {}", api_bind, e);
            return;
        }
    };
    let api_task = tokio::spawn(async move {
        println!("🌐 Auth API listening on {}", api_bind);
        if let Err(e) = axum::Server::bind(&api_addr)
            .serve(api::router(api_state).into_make_service())
            .await
        {
            log::error!("❌ Auth API server error: {}", e);
        }
    });

    // Set up command framework
    let prefix = config.bot.prefix.clone();
    println!("🤖 Starting bot with prefix: '{}'", prefix);
    let framework = StandardFramework::new()
        .configure(|c| {
            c.prefix(&prefix)
                .case_insensitivity(true)
                .no_dm_prefix(true)
                .with_whitespace(true)
        })
        .after(|_ctx, msg, command_name, result| {
            Box::pin(async move {
                if let Err(e) = result {
                    log::error!(
                        "❌ Command '{}' failed for user {} ({}): {:?}",
                        command_name,
                        msg.author.name,
                        msg.author.id,
                        e
                    );
                }
            })
        })
        .group(&GENERAL_GROUP);

    // Configure bot intents
    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;

    // Create and start client
    let mut client = match Client::builder(&config.bot.discord_token, intents)
        .event_handler(Handler)
        .framework(framework)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Error creating Discord client: {:?}", e);
            eprintln!("❌ Error creating Discord client: {:?}", e);
            eprintln!("Check DISCORD_TOKEN in royalconfig.txt");
            return;
        }
    };

    // Hand the shared state to the command handlers
    {
        let mut data = client.data.write().await;
        data.insert::<ConfigKey>(config.clone());
        data.insert::<DbKey>(pool);
        data.insert::<HeraldClientKey>(herald_client);
        data.insert::<FunkwhaleClientKey>(funkwhale_client);
    }

    println!("🚀 Bot is running... press Ctrl+C to stop");
    tokio::select! {
        _ = signal::ctrl_c() => {
            println!("\n⏹️ Stopping bot gracefully...");
        }
        result = client.start() => {
            if let Err(why) = result {
                log::error!("❌ Client error: {:?}", why);
            }
        }
    }

    api_task.abort();
    println!("👋 Bot stopped");
}
