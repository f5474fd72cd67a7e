//! Chatter roster sources.
//!
//! One abstraction over the three ways a roster can be obtained: the
//! authenticated Helix endpoint (paginated, credential-backed), the
//! public StreamElements endpoint (single page) and a generic
//! unauthenticated paginated roster endpoint. The active variant is
//! chosen by the `CHATTER_SOURCE` setting.

mod helix;
mod roster;
mod streamelements;

pub use helix::HelixChatterFetcher;
pub use roster::RosterSource;
pub use streamelements::StreamElementsSource;

use std::sync::LazyLock;

use raffle_db::Database;
use regex::Regex;
use twitch_client::api::Chatter;

use crate::config::AppConfig;
use crate::error::RaffleError;

/// Page size requested from paginated roster endpoints.
pub const PAGE_SIZE: u32 = 1000;

static RE_CHANNEL_LOGIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{1,25}$").unwrap());

pub enum ChatterSource {
    Helix(HelixChatterFetcher),
    StreamElements(StreamElementsSource),
    Roster(RosterSource),
}

impl ChatterSource {
    /// Build the configured source. Fails closed when required settings
    /// for that source are absent.
    pub fn from_config(config: &AppConfig, db: Database) -> Result<Self, RaffleError> {
        match config.chatter_source.as_str() {
            "streamelements" => Ok(Self::StreamElements(StreamElementsSource::new())),
            "roster" => Ok(Self::Roster(RosterSource::from_config(config)?)),
            _ => Ok(Self::Helix(HelixChatterFetcher::from_config(config, db)?)),
        }
    }

    /// Fetch the complete roster for this source.
    ///
    /// Unauthenticated sources need the `channel` query parameter; the
    /// Helix source is bound to the configured broadcaster and ignores it.
    pub async fn fetch_chatters(&self, channel: Option<&str>) -> Result<Vec<Chatter>, RaffleError> {
        match self {
            Self::Helix(fetcher) => fetcher.fetch_all_chatters().await,
            Self::StreamElements(source) => {
                let channel = require_channel(channel)?;
                source.fetch_chatters(&channel).await
            }
            Self::Roster(source) => {
                let channel = require_channel(channel)?;
                source.fetch_all_chatters(&channel).await
            }
        }
    }
}

/// Validate and normalize the `channel` parameter of unauthenticated
/// sources. Logins are matched case-insensitively, so fold to lowercase.
fn require_channel(channel: Option<&str>) -> Result<String, RaffleError> {
    let Some(channel) = channel.map(str::trim).filter(|value| !value.is_empty()) else {
        return Err(RaffleError::Validation {
            message: "Please provide a channel name in the URL.".into(),
            example: Some("/raffle?channel=your_twitch_name".into()),
        });
    };
    if !RE_CHANNEL_LOGIN.is_match(channel) {
        return Err(RaffleError::Validation {
            message: "Channel name must contain only letters, digits and underscores.".into(),
            example: Some("/raffle?channel=your_twitch_name".into()),
        });
    }
    Ok(channel.to_ascii_lowercase())
}
