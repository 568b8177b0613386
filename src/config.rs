// config.rs - Configuration Module
// This module loads the pack configuration from royalconfig.txt and exposes it
// as typed per-handler structs instead of one big string map.
//
// Key Features:
// - Multi-path config file loading (., .., ../.., src/)
// - KEY=VALUE parsing with comment and BOM handling
// - One struct per handler with its recognized keys enumerated
//
// Used by: main.rs (startup), commands (via the shared TypeMap), api (login endpoint)

use std::collections::HashMap;
use std::fs;

use log::info;

/// Bot-wide settings shared by every handler.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub prefix: String,
    /// Public base URL of this instance, used to build OAuth redirect URIs.
    pub base_url: String,
    /// Key used to sign state payloads handed out to users.
    pub secret_key: String,
    pub database_url: String,
    /// Bind address for the auth API server.
    pub api_bind: String,
}

/// Funkwhale instance settings for the playlist command.
#[derive(Debug, Clone)]
pub struct FunkwhaleConfig {
    pub instance_url: String,
}

/// osu! OAuth application settings for the login endpoint.
#[derive(Debug, Clone)]
pub struct OsuConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Whether linked osu! accounts may be used to obtain a login token.
    pub login_enabled: bool,
}

/// Herald event gateway settings for cross-process calls.
#[derive(Debug, Clone)]
pub struct HeraldConfig {
    pub url: String,
}

/// All configuration recognized by the pack.
#[derive(Debug, Clone)]
pub struct PackConfig {
    pub bot: BotConfig,
    pub funkwhale: FunkwhaleConfig,
    pub osu: OsuConfig,
    pub herald: HeraldConfig,
}

impl PackConfig {
    /// Load the configuration from royalconfig.txt, trying the same path list
    /// as every other file the bot reads.
    pub fn load() -> Result<PackConfig, String> {
        let config_paths = [
            "royalconfig.txt",
            "../royalconfig.txt",
            "../../royalconfig.txt",
            "src/royalconfig.txt",
        ];

        let mut config_content = String::new();
        let mut config_file_found = false;

        for path in &config_paths {
            match fs::read_to_string(path) {
                Ok(content) => {
                    config_content = content;
                    config_file_found = true;
                    info!("✅ Configuration loaded from: {}", path);
                    break;
                }
                Err(_) => continue,
            }
        }

        if !config_file_found {
            return Err(
                "royalconfig.txt not found in any expected location (., .., ../.., src/)".into(),
            );
        }

        Self::parse(&config_content)
    }

    /// Parse a KEY=VALUE config body into the typed structs.
    pub fn parse(content: &str) -> Result<PackConfig, String> {
        // Remove BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut config_map = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(equals_pos) = line.find('=') {
                let key = line[..equals_pos].trim().to_string();
                let value = line[equals_pos + 1..].trim().to_string();
                config_map.insert(key, value);
            }
        }

        let required = |key: &str| -> Result<String, String> {
            config_map
                .get(key)
                .cloned()
                .ok_or_else(|| format!("{} not found in royalconfig.txt", key))
        };

        let optional = |key: &str, default: &str| -> String {
            config_map
                .get(key)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        let login_enabled = optional("OSU_LOGIN_ENABLED", "false");
        let login_enabled = match login_enabled.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            other => {
                return Err(format!(
                    "OSU_LOGIN_ENABLED must be true or false, got '{}'",
                    other
                ))
            }
        };

        Ok(PackConfig {
            bot: BotConfig {
                discord_token: required("DISCORD_TOKEN")?,
                prefix: optional("PREFIX", "^"),
                base_url: required("BASE_URL")?,
                secret_key: required("SECRET_KEY")?,
                database_url: optional("DATABASE_URL", "sqlite://royalpack.db"),
                api_bind: optional("API_BIND", "127.0.0.1:44445"),
            },
            funkwhale: FunkwhaleConfig {
                instance_url: required("FUNKWHALE_INSTANCE_URL")?,
            },
            osu: OsuConfig {
                client_id: required("OSU_CLIENT_ID")?,
                client_secret: required("OSU_CLIENT_SECRET")?,
                login_enabled,
            },
            herald: HeraldConfig {
                url: required("HERALD_URL")?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> String {
        [
            "# royalpack configuration",
            "DISCORD_TOKEN=token-here",
            "PREFIX=^",
            "BASE_URL=https://ryg.example.org",
            "SECRET_KEY=super-secret",
            "FUNKWHALE_INSTANCE_URL=https://funkwhale.example.org",
            "OSU_CLIENT_ID=1234",
            "OSU_CLIENT_SECRET=abcd",
            "OSU_LOGIN_ENABLED=true",
            "HERALD_URL=http://127.0.0.1:44444",
        ]
        .join("\n")
    }

    #[test]
    fn test_parse_full_config() {
        let config = PackConfig::parse(&full_config()).unwrap();
        assert_eq!(config.bot.discord_token, "token-here");
        assert_eq!(config.bot.base_url, "https://ryg.example.org");
        assert_eq!(config.funkwhale.instance_url, "https://funkwhale.example.org");
        assert_eq!(config.osu.client_id, "1234");
        assert!(config.osu.login_enabled);
        assert_eq!(config.herald.url, "http://127.0.0.1:44444");
    }

    #[test]
    fn test_missing_key_names_the_key() {
        let body = full_config().replace("FUNKWHALE_INSTANCE_URL", "IGNORED");
        let err = PackConfig::parse(&body).unwrap_err();
        assert!(err.contains("FUNKWHALE_INSTANCE_URL"));
    }

    #[test]
    fn test_defaults_and_comments() {
        let body = full_config().replace("PREFIX=^", "# PREFIX=^");
        let config = PackConfig::parse(&body).unwrap();
        assert_eq!(config.bot.prefix, "^");
        assert_eq!(config.bot.database_url, "sqlite://royalpack.db");
    }

    #[test]
    fn test_login_flag_rejects_garbage() {
        let body = full_config().replace("OSU_LOGIN_ENABLED=true", "OSU_LOGIN_ENABLED=maybe");
        let err = PackConfig::parse(&body).unwrap_err();
        assert!(err.contains("OSU_LOGIN_ENABLED"));
    }

    #[test]
    fn test_bom_is_stripped() {
        let body = format!("\u{feff}{}", full_config());
        let config = PackConfig::parse(&body).unwrap();
        assert_eq!(config.bot.discord_token, "token-here");
    }
}
