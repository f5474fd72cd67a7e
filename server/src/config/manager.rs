//! SettingsManager: DB-backed settings with defaults, migration, and feature status.

use std::collections::HashMap;

use raffle_db::Database;

use super::defaults::DEFAULT_SETTINGS;
use super::validation::validate_setting;
use super::{FeatureStatus, SettingInfo, SettingType};

/// Wraps [`Database`] to provide high-level settings operations.
pub struct SettingsManager {
    db: Database,
}

impl SettingsManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Get a setting value. Falls back to default if not in DB.
    pub fn get_setting(&self, key: &str) -> Result<String, anyhow::Error> {
        if let Some(val) = self.db.get_setting(key)? {
            return Ok(val);
        }
        if let Some(def) = DEFAULT_SETTINGS.get(key) {
            return Ok(def.default.to_string());
        }
        anyhow::bail!("setting not found: {key}");
    }

    /// Set a setting value with validation.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        let def = DEFAULT_SETTINGS
            .get(key)
            .ok_or_else(|| anyhow::anyhow!("unknown setting key: {key}"))?;

        validate_setting(key, value)
            .map_err(|e| anyhow::anyhow!("validation error for {key}: {e}"))?;

        let type_str = if def.secret { "secret" } else { "normal" };
        self.db.set_setting(key, value, type_str)?;
        Ok(())
    }

    /// Get all settings, filling in defaults for missing keys.
    pub fn get_all_settings(&self) -> Result<HashMap<String, SettingInfo>, anyhow::Error> {
        let db_settings = self.db.get_all_settings()?;
        let mut result = HashMap::new();

        for (key, value) in &db_settings {
            let def = DEFAULT_SETTINGS.get(key.as_str());
            let setting_type = match def {
                Some(d) if d.secret => SettingType::Secret,
                _ => SettingType::Normal,
            };
            result.insert(
                key.clone(),
                SettingInfo {
                    key: key.clone(),
                    value: value.clone(),
                    setting_type,
                    required: def.map_or(false, |d| d.required),
                    description: def.map_or(String::new(), |d| d.description.to_string()),
                    has_value: !value.is_empty(),
                },
            );
        }

        // Fill defaults for missing keys
        for (key, def) in DEFAULT_SETTINGS.iter() {
            if !result.contains_key(*key) {
                result.insert(
                    key.to_string(),
                    SettingInfo {
                        key: key.to_string(),
                        value: def.default.to_string(),
                        setting_type: if def.secret {
                            SettingType::Secret
                        } else {
                            SettingType::Normal
                        },
                        required: def.required,
                        description: def.description.to_string(),
                        has_value: !def.default.is_empty(),
                    },
                );
            }
        }

        Ok(result)
    }

    /// Initialize default settings in DB (skip existing).
    pub fn initialize_defaults(&self) -> Result<(), anyhow::Error> {
        for (key, def) in DEFAULT_SETTINGS.iter() {
            if self.db.get_setting(key)?.is_some() {
                continue;
            }
            let type_str = if def.secret { "secret" } else { "normal" };
            self.db.set_setting(key, def.default, type_str)?;
        }
        Ok(())
    }

    /// Migrate settings from environment variables to DB (one-time).
    pub fn migrate_from_env(&self) -> Result<u32, anyhow::Error> {
        let mut migrated = 0u32;
        for key in DEFAULT_SETTINGS.keys() {
            if self.db.get_setting(key)?.is_some() {
                continue;
            }
            if let Ok(env_val) = std::env::var(key) {
                if !env_val.is_empty() {
                    let def = &DEFAULT_SETTINGS[key];
                    let type_str = if def.secret { "secret" } else { "normal" };
                    self.db.set_setting(key, &env_val, type_str)?;
                    tracing::info!("Migrated setting from env: {key}");
                    migrated += 1;
                }
            }
        }
        Ok(migrated)
    }

    /// Report which required settings are still unset.
    pub fn check_feature_status(&self) -> Result<FeatureStatus, anyhow::Error> {
        let mut missing = Vec::new();
        for (key, def) in DEFAULT_SETTINGS.iter() {
            if !def.required {
                continue;
            }
            if self.get_setting(key).unwrap_or_default().is_empty() {
                missing.push(key.to_string());
            }
        }
        missing.sort();

        Ok(FeatureStatus {
            twitch_configured: missing.is_empty(),
            missing_settings: missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manager() -> SettingsManager {
        SettingsManager::new(Database::open_in_memory().unwrap())
    }

    #[test]
    fn get_setting_falls_back_to_default() {
        let sm = test_manager();
        assert_eq!(sm.get_setting("WINNER_COUNT").unwrap(), "3");
        assert_eq!(sm.get_setting("CHATTER_SOURCE").unwrap(), "helix");
        assert!(sm.get_setting("NO_SUCH_KEY").is_err());
    }

    #[test]
    fn set_setting_rejects_unknown_keys_and_invalid_values() {
        let sm = test_manager();
        assert!(sm.set_setting("NO_SUCH_KEY", "x").is_err());
        assert!(sm.set_setting("WINNER_COUNT", "zero").is_err());
        assert!(sm.set_setting("WINNER_COUNT", "5").is_ok());
        assert_eq!(sm.get_setting("WINNER_COUNT").unwrap(), "5");
    }

    #[test]
    fn feature_status_lists_missing_required_settings() {
        let sm = test_manager();
        let status = sm.check_feature_status().unwrap();
        assert!(!status.twitch_configured);
        assert!(
            status
                .missing_settings
                .contains(&"TWITCH_CLIENT_SECRET".to_string())
        );

        for key in [
            "TWITCH_BROADCASTER_ID",
            "TWITCH_BOT_ID",
            "TWITCH_CLIENT_ID",
        ] {
            sm.set_setting(key, "12345").unwrap();
        }
        sm.set_setting("TWITCH_CLIENT_SECRET", "s3cret").unwrap();
        sm.set_setting("TWITCH_REFRESH_TOKEN", "r3fresh").unwrap();

        let status = sm.check_feature_status().unwrap();
        assert!(status.twitch_configured);
        assert!(status.missing_settings.is_empty());
    }
}
