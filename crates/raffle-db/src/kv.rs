//! TTL-aware key-value storage.
//!
//! Rows past their `expires_at` hint are invisible to readers and removed
//! opportunistically; a `NULL` expiry never expires.

use chrono::Utc;

use crate::{Database, DbError, OptionalExt};

impl Database {
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DbError> {
        Ok(self.kv_get_with_expiry(key)?.map(|(value, _)| value))
    }

    /// Fetch a live row together with its expiry hint (epoch seconds).
    pub fn kv_get_with_expiry(&self, key: &str) -> Result<Option<(String, Option<i64>)>, DbError> {
        let now = Utc::now().timestamp();
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT value, expires_at FROM kv_store
                 WHERE key = ?1 AND (expires_at IS NULL OR expires_at > ?2)",
            )?;
            let row = stmt
                .query_row(rusqlite::params![key, now], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, Option<i64>>(1)?))
                })
                .optional()?;
            Ok(row)
        })
    }

    /// Store a value, optionally expiring `ttl_seconds` from now.
    pub fn kv_put(&self, key: &str, value: &str, ttl_seconds: Option<i64>) -> Result<(), DbError> {
        let expires_at = ttl_seconds.map(|ttl| Utc::now().timestamp() + ttl);
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, expires_at, updated_at) VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, expires_at = ?3, updated_at = CURRENT_TIMESTAMP",
                rusqlite::params![key, value, expires_at],
            )?;
            Ok(())
        })
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
            Ok(())
        })
    }

    /// Remove rows whose TTL has elapsed. Returns the number of rows removed.
    pub fn kv_purge_expired(&self) -> Result<usize, DbError> {
        let now = Utc::now().timestamp();
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM kv_store WHERE expires_at IS NOT NULL AND expires_at <= ?1",
                [now],
            )?;
            if removed > 0 {
                tracing::debug!(removed, "Purged expired kv_store rows");
            }
            Ok(removed)
        })
    }
}
