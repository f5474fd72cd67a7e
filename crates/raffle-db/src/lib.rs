//! SQLite persistence layer for the raffle service.
//!
//! Holds the runtime settings table and the TTL'd key-value store that
//! backs the bearer-credential cache.

pub mod credentials;
pub mod kv;
pub mod schema;
pub mod settings;

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

/// Thread-safe database handle wrapping a single SQLite connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.configure()?;
        db.migrate()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.configure()?;
        db.migrate()?;
        Ok(db)
    }

    /// Access the underlying connection with a closure.
    pub fn with_conn<F, R>(&self, f: F) -> Result<R, DbError>
    where
        F: FnOnce(&Connection) -> Result<R, DbError>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn)
    }

    fn configure(&self) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA busy_timeout=5000;
                 PRAGMA foreign_keys=ON;",
            )?;
            Ok(())
        })
    }

    fn migrate(&self) -> Result<(), DbError> {
        self.with_conn(|conn| {
            schema::run_migrations(conn)?;
            Ok(())
        })
    }
}

/// Database error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,
}

/// Extension trait for optional query results.
pub(crate) trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalExt<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StoredCredential;

    fn test_db() -> Database {
        Database::open_in_memory().expect("Failed to create test DB")
    }

    #[test]
    fn test_open_and_migrate() {
        let db = test_db();
        let settings = db.get_all_settings().unwrap();
        assert!(settings.is_empty());
    }

    #[test]
    fn test_settings_crud() {
        let db = test_db();
        db.set_setting("key1", "value1", "normal").unwrap();
        assert_eq!(db.get_setting("key1").unwrap(), Some("value1".into()));

        db.set_setting("key1", "value2", "normal").unwrap();
        assert_eq!(db.get_setting("key1").unwrap(), Some("value2".into()));

        db.delete_setting("key1").unwrap();
        assert_eq!(db.get_setting("key1").unwrap(), None);
    }

    #[test]
    fn test_kv_roundtrip() {
        let db = test_db();
        assert!(db.kv_get("missing").unwrap().is_none());

        db.kv_put("k", "v", None).unwrap();
        assert_eq!(db.kv_get("k").unwrap(), Some("v".into()));

        db.kv_put("k", "v2", Some(3600)).unwrap();
        assert_eq!(db.kv_get("k").unwrap(), Some("v2".into()));

        db.kv_delete("k").unwrap();
        assert!(db.kv_get("k").unwrap().is_none());
    }

    #[test]
    fn test_kv_expired_rows_are_invisible() {
        let db = test_db();
        db.kv_put("gone", "x", Some(0)).unwrap();
        assert!(db.kv_get("gone").unwrap().is_none());
        assert!(db.kv_get_with_expiry("gone").unwrap().is_none());

        db.kv_put("kept", "y", Some(3600)).unwrap();
        let purged = db.kv_purge_expired().unwrap();
        assert_eq!(purged, 1);
        assert_eq!(db.kv_get("kept").unwrap(), Some("y".into()));
    }

    #[test]
    fn test_credential_roundtrip() {
        let db = test_db();
        assert!(db.get_credential().unwrap().is_none());

        let cred = StoredCredential {
            access_token: "abc".into(),
            expires_at: 0,
        };
        db.put_credential(&cred, 3600).unwrap();

        let got = db.get_credential().unwrap().unwrap();
        assert_eq!(got.access_token, "abc");
        assert!(got.expires_at > 0);

        db.delete_credential().unwrap();
        assert!(db.get_credential().unwrap().is_none());
    }

    #[test]
    fn test_credential_expires_with_ttl() {
        let db = test_db();
        let cred = StoredCredential {
            access_token: "short-lived".into(),
            expires_at: 0,
        };
        db.put_credential(&cred, 0).unwrap();
        assert!(db.get_credential().unwrap().is_none());
    }
}
