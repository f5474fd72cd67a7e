//! Runtime application configuration loaded from DB + environment overrides.

use super::manager::SettingsManager;

/// Runtime configuration populated from the settings DB.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub broadcaster_id: String,
    pub bot_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub chatter_source: String,
    pub roster_url: String,
    pub winner_count: usize,
    pub server_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            broadcaster_id: String::new(),
            bot_id: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            refresh_token: String::new(),
            chatter_source: "helix".into(),
            roster_url: String::new(),
            winner_count: 3,
            server_port: 8080,
        }
    }
}

impl AppConfig {
    /// Load configuration from the settings manager (DB-first, env overrides).
    pub fn load(sm: &SettingsManager) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> String { sm.get_setting(key).unwrap_or_default() };

        let mut server_port = parse_u16(&g("SERVER_PORT"), 8080);

        // Environment variable override (backwards compatibility)
        if let Ok(v) = std::env::var("SERVER_PORT") {
            if let Ok(p) = v.parse::<u16>() {
                server_port = p;
            }
        }

        Ok(Self {
            broadcaster_id: g("TWITCH_BROADCASTER_ID"),
            bot_id: g("TWITCH_BOT_ID"),
            client_id: g("TWITCH_CLIENT_ID"),
            client_secret: g("TWITCH_CLIENT_SECRET"),
            refresh_token: g("TWITCH_REFRESH_TOKEN"),
            chatter_source: {
                let s = g("CHATTER_SOURCE");
                if s.is_empty() { "helix".into() } else { s }
            },
            roster_url: g("CHATTER_ROSTER_URL"),
            winner_count: parse_usize(&g("WINNER_COUNT"), 3),
            server_port,
        })
    }

    /// Reload config from the settings manager.
    pub fn reload(&mut self, sm: &SettingsManager) -> Result<(), anyhow::Error> {
        *self = Self::load(sm)?;
        Ok(())
    }

    /// Required settings the authenticated Helix source is still missing.
    pub fn missing_helix_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.broadcaster_id.is_empty() {
            missing.push("TWITCH_BROADCASTER_ID");
        }
        if self.bot_id.is_empty() {
            missing.push("TWITCH_BOT_ID");
        }
        if self.client_id.is_empty() {
            missing.push("TWITCH_CLIENT_ID");
        }
        if self.client_secret.is_empty() {
            missing.push("TWITCH_CLIENT_SECRET");
        }
        if self.refresh_token.is_empty() {
            missing.push("TWITCH_REFRESH_TOKEN");
        }
        missing
    }
}

fn parse_u16(s: &str, default: u16) -> u16 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

fn parse_usize(s: &str, default: usize) -> usize {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
