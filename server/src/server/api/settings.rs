//! Settings management API:
//!   GET /api/settings – all settings + configuration status
//!   PUT /api/settings – update settings and reload runtime config

use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::config::{SettingType, SettingsManager};
use crate::error::RaffleError;

/// GET /api/settings
pub async fn get_settings(State(state): State<SharedState>) -> Result<Json<Value>, RaffleError> {
    let sm = SettingsManager::new(state.db().clone());

    let all = sm.get_all_settings()?;
    let status = sm.check_feature_status()?;

    let settings_map: HashMap<String, Value> = all
        .into_iter()
        .map(|(key, info)| {
            // Secret values never leave the server.
            let value = if info.setting_type == SettingType::Secret && info.has_value {
                "********".to_string()
            } else {
                info.value
            };
            let val = json!({
                "key": info.key,
                "value": value,
                "type": info.setting_type,
                "required": info.required,
                "description": info.description,
                "has_value": info.has_value,
            });
            (key, val)
        })
        .collect();

    Ok(Json(json!({
        "settings": settings_map,
        "status": status,
    })))
}

/// PUT /api/settings
pub async fn update_settings(
    State(state): State<SharedState>,
    Json(body): Json<HashMap<String, String>>,
) -> Result<Json<Value>, RaffleError> {
    let sm = SettingsManager::new(state.db().clone());

    let mut updated = 0u32;
    for (key, value) in &body {
        sm.set_setting(key, value)
            .map_err(|e| RaffleError::Validation {
                message: format!("{key}: {e}"),
                example: None,
            })?;
        updated += 1;
    }

    // Reload runtime config
    state.reload_config().await?;

    let status = sm.check_feature_status()?;

    Ok(Json(json!({
        "success": true,
        "status": status,
        "message": format!("Updated {updated} setting(s) successfully"),
    })))
}
