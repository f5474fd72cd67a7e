//! Bearer credential storage.
//!
//! Single fixed key; written only by the refresh path. The TTL recorded
//! here is an eviction hint — the roster API remains the authority on
//! whether a token is actually still valid.

use serde::{Deserialize, Serialize};

use crate::{Database, DbError};

/// Key under which the current bearer token is persisted.
pub const ACCESS_TOKEN_KEY: &str = "twitch_access_token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    pub access_token: String,
    /// Expiry hint in epoch seconds, as recorded at write time.
    pub expires_at: i64,
}

impl Database {
    pub fn get_credential(&self) -> Result<Option<StoredCredential>, DbError> {
        let Some((access_token, expires_at)) = self.kv_get_with_expiry(ACCESS_TOKEN_KEY)? else {
            return Ok(None);
        };
        Ok(Some(StoredCredential {
            access_token,
            expires_at: expires_at.unwrap_or(0),
        }))
    }

    pub fn put_credential(
        &self,
        credential: &StoredCredential,
        ttl_seconds: i64,
    ) -> Result<(), DbError> {
        self.kv_put(ACCESS_TOKEN_KEY, &credential.access_token, Some(ttl_seconds))
    }

    pub fn delete_credential(&self) -> Result<(), DbError> {
        self.kv_delete(ACCESS_TOKEN_KEY)
    }
}
