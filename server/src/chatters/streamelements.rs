//! Public StreamElements chat-stats source.
//!
//! Single unauthenticated request; the endpoint does not paginate and
//! carries no credential.

use serde::Deserialize;
use twitch_client::api::Chatter;

use crate::error::RaffleError;

const CHATSTATS_BASE: &str = "https://api.streamelements.com/kappa/v2/chatstats";

#[derive(Debug, Deserialize)]
struct ChatStatsResponse {
    #[serde(default)]
    chatters: Vec<ChatStatsEntry>,
}

#[derive(Debug, Deserialize)]
struct ChatStatsEntry {
    name: String,
}

pub struct StreamElementsSource {
    http: reqwest::Client,
    base_url: String,
}

impl StreamElementsSource {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: CHATSTATS_BASE.to_string(),
        }
    }

    /// Source pointed at an alternative chat-stats base URL (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch_chatters(&self, channel: &str) -> Result<Vec<Chatter>, RaffleError> {
        let url = format!("{}/{channel}/stats", self.base_url);
        let resp = self.http.get(&url).send().await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(RaffleError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let stats: ChatStatsResponse = serde_json::from_str(&body)?;
        Ok(stats
            .chatters
            .into_iter()
            .map(|entry| Chatter {
                user_id: String::new(),
                user_login: entry.name.clone(),
                user_name: entry.name,
            })
            .collect())
    }
}

impl Default for StreamElementsSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn chatters_are_mapped_from_the_stats_payload() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/somechannel/stats");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"chatters":[{"name":"Alice"},{"name":"bob"}],"total":2}"#);
            })
            .await;

        let source = StreamElementsSource::with_base_url(server.base_url());
        let rows = source.fetch_chatters("somechannel").await.unwrap();

        mock.assert_async().await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user_login, "Alice");
        assert_eq!(rows[0].user_name, "Alice");
        assert!(rows[0].user_id.is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_carries_status_and_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing/stats");
                then.status(404).body("channel not found");
            })
            .await;

        let source = StreamElementsSource::with_base_url(server.base_url());
        let err = source.fetch_chatters("missing").await.unwrap_err();

        match err {
            RaffleError::Upstream { status: 404, body } => {
                assert_eq!(body, "channel not found");
            }
            other => panic!("expected Upstream 404, got {other:?}"),
        }
    }
}
