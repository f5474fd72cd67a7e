//! The raffle endpoint: fetch roster → filter → sample → respond.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};
use twitch_client::api::Chatter;

use crate::app::SharedState;
use crate::chatters::ChatterSource;
use crate::error::RaffleError;
use crate::raffle::{EXCLUDED_SET, eligible_chatters, sample_winners};

#[derive(Debug, Deserialize)]
pub struct RaffleQuery {
    pub channel: Option<String>,
}

/// GET /raffle
pub async fn draw_raffle(
    State(state): State<SharedState>,
    Query(q): Query<RaffleQuery>,
) -> Result<Json<Value>, RaffleError> {
    let (source, winner_count) = {
        let config = state.config().await;
        (
            ChatterSource::from_config(&config, state.db().clone())?,
            config.winner_count,
        )
    };

    let rows = source.fetch_chatters(q.channel.as_deref()).await?;
    let eligible = eligible_chatters(rows, &EXCLUDED_SET);
    let winners = sample_winners(&eligible, winner_count);

    Ok(Json(raffle_payload(&winners, eligible.len())))
}

/// Map sampled records to their display names; an empty eligible set is
/// a well-formed empty draw, not an error.
fn raffle_payload(winners: &[Chatter], eligible_count: usize) -> Value {
    let names: Vec<&str> = winners.iter().map(|c| c.user_name.as_str()).collect();
    json!({
        "winners": names,
        "chatter_count": eligible_count,
    })
}
