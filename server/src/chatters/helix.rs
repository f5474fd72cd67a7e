//! Credential-lifecycle-aware paginated chatter fetch.
//!
//! Pagination and auth-retry are coupled: the cached token can expire
//! while a fetch is mid-pagination, so the first 401 in a fetch
//! refreshes the credential and replays the same page. A second
//! authorization failure after that is fatal rather than retried.

use chrono::Utc;
use raffle_db::Database;
use raffle_db::credentials::StoredCredential;
use twitch_client::api::{Chatter, TwitchApiClient};
use twitch_client::auth::TwitchAuth;
use twitch_client::{Token, TwitchError};

use crate::config::AppConfig;
use crate::error::RaffleError;

use super::PAGE_SIZE;

/// Stored TTLs back off this far from the provider-declared lifetime
/// to pre-empt edge-of-expiry races.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Fetches the full chat roster through the authenticated Helix
/// endpoint, maintaining the cached bearer credential as it goes.
pub struct HelixChatterFetcher {
    client: TwitchApiClient,
    auth: TwitchAuth,
    store: Database,
    broadcaster_id: String,
    moderator_id: String,
    refresh_secret: String,
}

impl std::fmt::Debug for HelixChatterFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelixChatterFetcher")
            .field("broadcaster_id", &self.broadcaster_id)
            .field("moderator_id", &self.moderator_id)
            .finish_non_exhaustive()
    }
}

impl HelixChatterFetcher {
    /// Build from runtime config. Fails closed, before any network
    /// call, when required settings are absent.
    pub fn from_config(config: &AppConfig, store: Database) -> Result<Self, RaffleError> {
        let missing = config.missing_helix_settings();
        if !missing.is_empty() {
            return Err(RaffleError::Configuration(missing.join(", ")));
        }

        Ok(Self {
            client: TwitchApiClient::new(config.client_id.clone()),
            auth: TwitchAuth::new(config.client_id.clone(), config.client_secret.clone()),
            store,
            broadcaster_id: config.broadcaster_id.clone(),
            moderator_id: config.bot_id.clone(),
            refresh_secret: config.refresh_token.clone(),
        })
    }

    /// Fetch the complete roster, following the cursor until exhausted.
    ///
    /// Pages are requested strictly sequentially; each page depends on
    /// the prior page's cursor.
    pub async fn fetch_all_chatters(&self) -> Result<Vec<Chatter>, RaffleError> {
        let mut token = self.current_credential().await?;
        let mut rows: Vec<Chatter> = Vec::new();
        let mut after: Option<String> = None;
        let mut refreshed_once = false;

        loop {
            let (mut page_rows, next_cursor) = match self.page(&token, after.as_deref()).await {
                Ok(page) => page,
                Err(err) if is_unauthorized_error(&err) && !refreshed_once => {
                    tracing::warn!("Chatters fetch got 401, refreshing token and retrying");
                    refreshed_once = true;
                    token = self.refresh_credential().await?;
                    // Replay the same page; a second 401 propagates.
                    self.page(&token, after.as_deref()).await?
                }
                Err(err) => return Err(err.into()),
            };

            rows.append(&mut page_rows);
            let Some(cursor) = next_cursor.filter(|cursor| !cursor.is_empty()) else {
                break;
            };
            after = Some(cursor);
        }

        Ok(rows)
    }

    /// Refresh the credential unconditionally and persist it.
    pub async fn force_refresh(&self) -> Result<Token, RaffleError> {
        self.refresh_credential().await
    }

    async fn page(
        &self,
        token: &Token,
        after: Option<&str>,
    ) -> Result<(Vec<Chatter>, Option<String>), TwitchError> {
        let (rows, cursor, _total) = self
            .client
            .get_chatters_page(
                token,
                &self.broadcaster_id,
                &self.moderator_id,
                PAGE_SIZE,
                after,
            )
            .await?;
        Ok((rows, cursor))
    }

    /// Read the stored credential, refreshing on absence (bootstrap).
    async fn current_credential(&self) -> Result<Token, RaffleError> {
        if let Some(stored) = self.store.get_credential()? {
            return Ok(Token {
                access_token: stored.access_token,
                expires_at: stored.expires_at,
            });
        }
        tracing::info!("No stored credential, performing bootstrap refresh");
        self.refresh_credential().await
    }

    async fn refresh_credential(&self) -> Result<Token, RaffleError> {
        let token = self.auth.refresh_token(&self.refresh_secret).await?;
        let ttl = (token.expires_at - Utc::now().timestamp() - EXPIRY_MARGIN_SECS).max(0);
        self.store.put_credential(
            &StoredCredential {
                access_token: token.access_token.clone(),
                expires_at: token.expires_at,
            },
            ttl,
        )?;
        tracing::info!(expires_at = token.expires_at, "Token refreshed and persisted");
        Ok(token)
    }
}

fn is_unauthorized_error(err: &TwitchError) -> bool {
    matches!(err, TwitchError::ApiError { status: 401, .. })
}
