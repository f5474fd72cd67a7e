//! OAuth token management for Twitch authentication.
//!
//! Exchanges the long-lived refresh secret for a short-lived bearer
//! token. There is no authorization-code flow here: the refresh secret
//! is provisioned out of band and never rotated by this service.

use chrono::Utc;
use serde::Deserialize;

use crate::{Token, TwitchError};

const TOKEN_ENDPOINT: &str = "https://id.twitch.tv/oauth2/token";

/// Twitch OAuth token response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Twitch OAuth error response.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

/// Performs the refresh-token exchange against the identity provider.
///
/// The caller is responsible for persisting the resulting token.
pub struct TwitchAuth {
    client_id: String,
    client_secret: String,
    token_url: String,
    http: reqwest::Client,
}

impl TwitchAuth {
    /// Create a new auth manager.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            token_url: TOKEN_ENDPOINT.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Point the exchange at an alternative token endpoint (tests).
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Exchange the refresh secret for a fresh bearer token.
    ///
    /// Any failure — transport, non-2xx from the provider, or an
    /// unparseable body — is a [`TwitchError::TokenRefreshFailed`].
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Token, TwitchError> {
        tracing::info!("Refreshing Twitch OAuth token");

        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let resp = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| TwitchError::TokenRefreshFailed(e.to_string()))?;

        self.parse_token_response(resp).await
    }

    /// Parse the token endpoint response into a `Token`.
    async fn parse_token_response(&self, resp: reqwest::Response) -> Result<Token, TwitchError> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TwitchError::TokenRefreshFailed(e.to_string()))?;

        if !status.is_success() {
            let err: ErrorResponse = serde_json::from_str(&body).unwrap_or(ErrorResponse {
                error: Some(status.to_string()),
                error_description: Some(body.clone()),
            });
            return Err(TwitchError::TokenRefreshFailed(format!(
                "{}: {}",
                err.error.unwrap_or_default(),
                err.error_description.unwrap_or_default()
            )));
        }

        let token_resp: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            TwitchError::TokenRefreshFailed(format!("failed to parse response: {e}"))
        })?;

        let expires_at = Utc::now().timestamp() + token_resp.expires_in;

        Ok(Token {
            access_token: token_resp.access_token,
            expires_at,
        })
    }
}
