//! Request-scoped error taxonomy and its HTTP mapping.
//!
//! Every failure class maps to a JSON `{ "error": ... }` body at the
//! handler boundary; either the full winners payload is returned or an
//! error object is — never a partial result.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use twitch_client::TwitchError;

#[derive(Debug, thiserror::Error)]
pub enum RaffleError {
    /// Required settings are absent. Checked before any network call.
    #[error("Server is not configured. Missing required settings: {0}")]
    Configuration(String),

    /// The request is missing required input.
    #[error("{message}")]
    Validation {
        message: String,
        example: Option<String>,
    },

    /// The refresh exchange with the identity provider failed.
    #[error("Token refresh failed: {0}")]
    AuthProvider(String),

    /// The roster API returned a non-auth failure, or authorization
    /// failed twice in a row.
    #[error("Upstream API responded with status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Network-level failure talking to an upstream.
    #[error("Network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream body did not match the expected wire shape.
    #[error("Failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Credential store failure.
    #[error("Credential store error: {0}")]
    Db(#[from] raffle_db::DbError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<TwitchError> for RaffleError {
    fn from(err: TwitchError) -> Self {
        match err {
            TwitchError::TokenRefreshFailed(msg) => Self::AuthProvider(msg),
            TwitchError::ApiError { status, message } => Self::Upstream {
                status,
                body: message,
            },
            TwitchError::Http(e) => Self::Transport(e),
            TwitchError::Json(e) => Self::Decode(e),
        }
    }
}

impl RaffleError {
    /// Status + JSON body, exposed separately so tests can assert on
    /// the mapping without driving a full response.
    pub fn response_parts(&self) -> (StatusCode, Value) {
        match self {
            Self::Validation {
                message,
                example: Some(example),
            } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": message, "example": example }),
            ),
            Self::Validation { message, .. } => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": other.to_string() }),
            ),
        }
    }
}

impl IntoResponse for RaffleError {
    fn into_response(self) -> Response {
        let (status, body) = self.response_parts();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "Request failed");
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_configuration_maps_to_500_with_message() {
        let err = RaffleError::Configuration("TWITCH_CLIENT_SECRET".into());
        let (status, body) = err.response_parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Server is not configured. Missing required settings: TWITCH_CLIENT_SECRET"
        );
    }

    #[test]
    fn validation_maps_to_400_with_example() {
        let err = RaffleError::Validation {
            message: "Please provide a channel name in the URL.".into(),
            example: Some("/raffle?channel=your_twitch_name".into()),
        };
        let (status, body) = err.response_parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please provide a channel name in the URL.");
        assert_eq!(body["example"], "/raffle?channel=your_twitch_name");
    }

    #[test]
    fn upstream_and_auth_failures_map_to_500() {
        let upstream = RaffleError::Upstream {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(
            upstream.response_parts().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let auth = RaffleError::AuthProvider("invalid_grant".into());
        let (status, body) = auth.response_parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Token refresh failed: invalid_grant");
    }

    #[test]
    fn twitch_errors_map_onto_the_taxonomy() {
        let refreshed: RaffleError =
            TwitchError::TokenRefreshFailed("invalid_grant".into()).into();
        assert!(matches!(refreshed, RaffleError::AuthProvider(_)));

        let upstream: RaffleError = TwitchError::ApiError {
            status: 502,
            message: "bad gateway".into(),
        }
        .into();
        assert!(matches!(
            upstream,
            RaffleError::Upstream { status: 502, .. }
        ));
    }
}
