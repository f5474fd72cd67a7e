//! Twitch Helix REST API client.
//!
//! Provides typed access to the chat-roster endpoint with automatic
//! Bearer token + Client-ID header injection. A 401 is surfaced as an
//! error so the caller can refresh the token and retry.

mod chatters;
mod request;

pub mod models;

pub use models::{Chatter, ChattersPaginatedResponse, HelixPagination};

use crate::{Token, TwitchError};

const HELIX_BASE: &str = "https://api.twitch.tv/helix";

/// Twitch Helix API client with automatic auth header injection.
pub struct TwitchApiClient {
    pub(super) http: reqwest::Client,
    pub(super) client_id: String,
    pub(super) base_url: String,
}
