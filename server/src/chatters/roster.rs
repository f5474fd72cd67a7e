//! Generic unauthenticated paginated roster source.
//!
//! Speaks the same `{ data, pagination: { cursor } }` wire shape as
//! the Helix chatters endpoint, but against a configured public
//! endpoint with no credential and therefore no refresh/retry cycle.

use twitch_client::api::{Chatter, ChattersPaginatedResponse};

use crate::config::AppConfig;
use crate::error::RaffleError;

use super::PAGE_SIZE;

pub struct RosterSource {
    http: reqwest::Client,
    base_url: String,
}

impl RosterSource {
    pub fn from_config(config: &AppConfig) -> Result<Self, RaffleError> {
        if config.roster_url.is_empty() {
            return Err(RaffleError::Configuration("CHATTER_ROSTER_URL".into()));
        }
        Ok(Self::with_base_url(config.roster_url.clone()))
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the complete roster, following the cursor until exhausted.
    pub async fn fetch_all_chatters(&self, channel: &str) -> Result<Vec<Chatter>, RaffleError> {
        let mut rows: Vec<Chatter> = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let (mut page_rows, next_cursor) = self.page(channel, after.as_deref()).await?;
            rows.append(&mut page_rows);
            let Some(cursor) = next_cursor.filter(|cursor| !cursor.is_empty()) else {
                break;
            };
            after = Some(cursor);
        }

        Ok(rows)
    }

    async fn page(
        &self,
        channel: &str,
        after: Option<&str>,
    ) -> Result<(Vec<Chatter>, Option<String>), RaffleError> {
        let mut url = format!("{}?channel={channel}&first={PAGE_SIZE}", self.base_url);
        if let Some(cursor) = after.filter(|v| !v.is_empty()) {
            url.push_str("&after=");
            url.push_str(cursor);
        }

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(RaffleError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let page: ChattersPaginatedResponse = serde_json::from_str(&body)?;
        Ok((page.data, page.pagination.and_then(|p| p.cursor)))
    }
}
