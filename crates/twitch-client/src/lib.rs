//! Twitch integration client library.
//!
//! Provides the Helix chat-roster client and refresh-token exchange
//! against the Twitch identity provider.

pub mod api;
pub mod auth;

use serde::{Deserialize, Serialize};

/// Bearer credential presented to Helix API calls.
///
/// The caller is responsible for persisting this (e.g. via raffle-db).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    /// Epoch seconds at which the provider declared the token expired.
    pub expires_at: i64,
}

/// Unified error type for the twitch-client crate.
#[derive(Debug, thiserror::Error)]
pub enum TwitchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),

    #[error("Twitch API error (status {status}): {message}")]
    ApiError { status: u16, message: String },
}
