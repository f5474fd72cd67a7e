//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub secret: bool,
    pub required: bool,
    pub description: &'static str,
}

// (key, default, secret, required, description)
const DEFS: &[(&str, &str, bool, bool, &str)] = &[
    (
        "TWITCH_BROADCASTER_ID",
        "",
        false,
        true,
        "User id of the channel whose chatters are eligible",
    ),
    (
        "TWITCH_BOT_ID",
        "",
        false,
        true,
        "Moderator (bot) user id the roster is read as",
    ),
    (
        "TWITCH_CLIENT_ID",
        "",
        false,
        true,
        "Twitch application client id",
    ),
    (
        "TWITCH_CLIENT_SECRET",
        "",
        true,
        true,
        "Twitch application client secret",
    ),
    (
        "TWITCH_REFRESH_TOKEN",
        "",
        true,
        true,
        "Long-lived refresh secret for the bot account",
    ),
    (
        "CHATTER_SOURCE",
        "helix",
        false,
        false,
        "Roster source: helix, streamelements or roster",
    ),
    (
        "CHATTER_ROSTER_URL",
        "",
        false,
        false,
        "Base URL of the unauthenticated paginated roster endpoint",
    ),
    (
        "WINNER_COUNT",
        "3",
        false,
        false,
        "How many winners a draw selects",
    ),
    ("SERVER_PORT", "8080", false, false, "HTTP listen port"),
];

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, secret, required, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    secret,
                    required,
                    description,
                },
            )
        })
        .collect()
});
