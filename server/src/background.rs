//! Background task loops: periodic credential refresh.

use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::app::SharedState;
use crate::chatters::HelixChatterFetcher;
use crate::error::RaffleError;

const CHECK_INTERVAL_SECS: u64 = 30 * 60;
const INITIAL_BACKOFF_SECS: u64 = 30;
const MAX_BACKOFF_SECS: u64 = 30 * 60;

/// Refresh when the stored credential expires within this window.
const REFRESH_MARGIN_SECS: i64 = 5 * 60;

async fn sleep_or_cancel(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = token.cancelled() => true,
        _ = sleep(duration) => false,
    }
}

/// Periodically check and refresh the stored bearer credential.
///
/// Purely advisory: the request path bootstraps or self-heals on 401
/// regardless, this loop just keeps the common case off that path.
/// Races with request-path refreshes are benign — last write wins.
pub async fn credential_refresh_loop(state: SharedState) {
    let shutdown_token = state.shutdown_token().clone();

    // Wait for initial startup
    if sleep_or_cancel(&shutdown_token, Duration::from_secs(10)).await {
        tracing::info!("Credential refresh loop stopped (shutdown)");
        return;
    }
    let mut failure_backoff_secs = INITIAL_BACKOFF_SECS;

    loop {
        match refresh_if_expiring(&state).await {
            Ok(()) => {
                failure_backoff_secs = INITIAL_BACKOFF_SECS;
                if sleep_or_cancel(&shutdown_token, Duration::from_secs(CHECK_INTERVAL_SECS)).await
                {
                    tracing::info!("Credential refresh loop stopped (shutdown)");
                    return;
                }
            }
            Err(e) => {
                tracing::error!("Credential auto-refresh failed: {e}");
                tracing::warn!(
                    retry_after_secs = failure_backoff_secs,
                    "Retrying credential refresh with exponential backoff"
                );
                if sleep_or_cancel(&shutdown_token, Duration::from_secs(failure_backoff_secs)).await
                {
                    tracing::info!("Credential refresh loop stopped (shutdown)");
                    return;
                }
                failure_backoff_secs = (failure_backoff_secs * 2).min(MAX_BACKOFF_SECS);
            }
        }
    }
}

async fn refresh_if_expiring(state: &SharedState) -> Result<(), RaffleError> {
    state.db().kv_purge_expired()?;

    let fetcher = {
        let config = state.config().await;
        match HelixChatterFetcher::from_config(&config, state.db().clone()) {
            Ok(fetcher) => fetcher,
            // Not configured yet; nothing to maintain.
            Err(_) => return Ok(()),
        }
    };

    let Some(credential) = state.db().get_credential()? else {
        // Nothing cached; the next request bootstraps.
        return Ok(());
    };

    let now = Utc::now().timestamp();
    let time_until_expiry = credential.expires_at - now;
    if time_until_expiry > REFRESH_MARGIN_SECS {
        return Ok(());
    }

    tracing::info!(time_until_expiry, "Credential expiring soon, refreshing");
    fetcher.force_refresh().await?;
    Ok(())
}
