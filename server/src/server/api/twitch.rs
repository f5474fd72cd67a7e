//! Credential maintenance endpoints.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::chatters::HelixChatterFetcher;
use crate::error::RaffleError;

/// GET /api/twitch/auth/status
pub async fn auth_status(State(state): State<SharedState>) -> Result<Json<Value>, RaffleError> {
    let credential = state.db().get_credential()?;
    Ok(Json(json!({
        "authenticated": credential.is_some(),
        "expires_at": credential.as_ref().map(|c| c.expires_at),
    })))
}

/// POST /api/twitch/refresh-token
pub async fn refresh_token(State(state): State<SharedState>) -> Result<Json<Value>, RaffleError> {
    let fetcher = {
        let config = state.config().await;
        HelixChatterFetcher::from_config(&config, state.db().clone())?
    };

    let token = fetcher.force_refresh().await?;
    Ok(Json(json!({
        "success": true,
        "expires_at": token.expires_at,
    })))
}
