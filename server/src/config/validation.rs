//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_NUMERIC_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "TWITCH_BROADCASTER_ID" | "TWITCH_BOT_ID" => {
            if !value.is_empty() && !RE_NUMERIC_ID.is_match(value) {
                return Err("must be a numeric Twitch user id".into());
            }
        }
        "CHATTER_SOURCE" => {
            if !["helix", "streamelements", "roster"].contains(&value) {
                return Err("must be 'helix', 'streamelements' or 'roster'".into());
            }
        }
        "CHATTER_ROSTER_URL" => {
            if !value.is_empty()
                && !value.starts_with("http://")
                && !value.starts_with("https://")
            {
                return Err("must be an http(s) URL".into());
            }
        }
        "WINNER_COUNT" => validate_int_range(value, 1, 25)?,
        "SERVER_PORT" => {
            let v: u32 = value.parse().map_err(|_| "must be an integer")?;
            if !(1..=65535).contains(&v) {
                return Err("must be between 1 and 65535".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i32, max: i32) -> Result<(), String> {
    let v: i32 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
