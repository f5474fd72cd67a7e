//! Denylist filtering of the accumulated roster.

use std::collections::HashSet;

use twitch_client::api::Chatter;

/// Retain chatters whose login is non-empty and, ASCII-lowercased, not
/// in the excluded set. Input order is preserved.
pub fn eligible_chatters(rows: Vec<Chatter>, excluded: &HashSet<&str>) -> Vec<Chatter> {
    rows.into_iter()
        .filter(|chatter| {
            !chatter.user_login.is_empty()
                && !excluded.contains(chatter.user_login.to_ascii_lowercase().as_str())
        })
        .collect()
}
