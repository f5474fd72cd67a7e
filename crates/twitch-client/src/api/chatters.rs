use super::*;

impl TwitchApiClient {
    /// Get one page of chatters for the specified broadcaster and moderator.
    ///
    /// An empty-string cursor is treated the same as no cursor.
    pub async fn get_chatters_page(
        &self,
        token: &Token,
        broadcaster_id: &str,
        moderator_id: &str,
        first: u32,
        after: Option<&str>,
    ) -> Result<(Vec<Chatter>, Option<String>, u64), TwitchError> {
        let clamped = first.clamp(1, 1000);
        let mut url = format!(
            "{}/chat/chatters?broadcaster_id={broadcaster_id}&moderator_id={moderator_id}&first={clamped}",
            self.base_url
        );
        if let Some(cursor) = after.filter(|v| !v.is_empty()) {
            url.push_str("&after=");
            url.push_str(cursor);
        }
        let body = self.authenticated_get(&url, token).await?;
        let resp: ChattersPaginatedResponse = serde_json::from_str(&body)?;
        let next_cursor = resp.pagination.and_then(|p| p.cursor);
        Ok((resp.data, next_cursor, resp.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn token() -> Token {
        Token {
            access_token: "test-access".into(),
            expires_at: i64::MAX,
        }
    }

    #[test]
    fn chatters_paginated_response_deserializes_total_and_cursor() {
        let body = r#"{
          "data": [{
            "user_id": "1",
            "user_login": "alice",
            "user_name": "Alice"
          }],
          "pagination": { "cursor": "next-cursor" },
          "total": 120
        }"#;

        let parsed: ChattersPaginatedResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].user_login, "alice");
        assert_eq!(
            parsed.pagination.and_then(|p| p.cursor),
            Some("next-cursor".to_string())
        );
        assert_eq!(parsed.total, 120);
    }

    #[tokio::test]
    async fn page_request_carries_auth_headers_and_cursor() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/chat/chatters")
                    .query_param("broadcaster_id", "100")
                    .query_param("moderator_id", "200")
                    .query_param("first", "1000")
                    .query_param("after", "cursor-1")
                    .header("Authorization", "Bearer test-access")
                    .header("Client-Id", "client-1");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"data":[],"pagination":{},"total":0}"#);
            })
            .await;

        let client = TwitchApiClient::with_base_url("client-1".into(), server.base_url());
        let (rows, cursor, total) = client
            .get_chatters_page(&token(), "100", "200", 1000, Some("cursor-1"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(rows.is_empty());
        assert!(cursor.is_none());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn empty_cursor_is_not_forwarded() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/chat/chatters")
                    .query_param_missing("after");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"data":[],"total":0}"#);
            })
            .await;

        let client = TwitchApiClient::with_base_url("client-1".into(), server.base_url());
        client
            .get_chatters_page(&token(), "100", "200", 1000, Some(""))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_page_surfaces_as_401_api_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/chat/chatters");
                then.status(401)
                    .header("content-type", "application/json")
                    .body(r#"{"error":"Unauthorized","status":401,"message":"Invalid OAuth token"}"#);
            })
            .await;

        let client = TwitchApiClient::with_base_url("client-1".into(), server.base_url());
        let err = client
            .get_chatters_page(&token(), "100", "200", 1000, None)
            .await
            .unwrap_err();

        match err {
            TwitchError::ApiError { status: 401, message } => {
                assert!(message.contains("Invalid OAuth token"));
            }
            other => panic!("expected 401 ApiError, got {other:?}"),
        }
    }
}
