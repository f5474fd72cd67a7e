use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use super::*;

impl TwitchApiClient {
    pub fn new(client_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            base_url: HELIX_BASE.to_string(),
        }
    }

    /// Client pointed at an alternative Helix base URL (tests).
    pub fn with_base_url(client_id: String, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            base_url: base_url.into(),
        }
    }

    /// Build auth headers from the given token.
    fn auth_headers(&self, token: &Token) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", token.access_token);
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&bearer).unwrap());
        headers.insert("Client-Id", HeaderValue::from_str(&self.client_id).unwrap());
        headers
    }

    /// Execute a GET request with auth headers.
    ///
    /// A 401 comes back as `ApiError { status: 401, .. }` so the caller
    /// can refresh the token and retry once.
    pub(super) async fn authenticated_get(
        &self,
        url: &str,
        token: &Token,
    ) -> Result<String, TwitchError> {
        let headers = self.auth_headers(token);
        let resp = self.http.get(url).headers(headers).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!(url, "Got 401, caller should refresh token and retry");
            return Err(TwitchError::ApiError {
                status: 401,
                message: body,
            });
        }

        if !status.is_success() {
            return Err(TwitchError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }
}
