//! Credential storage in SQLite.

use crate::db::Database;
use chrono::Utc;
use thiserror::Error;

/// Key under which the session token is stored.
pub const AUTH_TOKEN_KEY: &str = "authToken";

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// A stored credential.
#[derive(Debug, Clone)]
pub struct StoredCredential {
    pub key: String,
    pub value: String,
    pub updated_at: i64,
}

/// Keyed credential storage operations.
pub struct CredentialStore<'a> {
    db: &'a Database,
}

impl<'a> CredentialStore<'a> {
    /// Create a new credential store.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Save a credential under a key, replacing any previous value.
    pub fn save(&self, key: &str, value: &str) -> Result<(), CredentialStoreError> {
        let now = Utc::now().timestamp();

        self.db.conn().execute(
            "INSERT INTO credentials (key, value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            rusqlite::params![key, value, now],
        )?;

        Ok(())
    }

    /// Load the credential stored under a key.
    pub fn load(&self, key: &str) -> Result<Option<StoredCredential>, CredentialStoreError> {
        let result = self.db.conn().query_row(
            "SELECT key, value, updated_at FROM credentials WHERE key = ?",
            [key],
            |row| {
                Ok(StoredCredential {
                    key: row.get(0)?,
                    value: row.get(1)?,
                    updated_at: row.get(2)?,
                })
            },
        );

        match result {
            Ok(credential) => Ok(Some(credential)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CredentialStoreError::Database(e)),
        }
    }

    /// Remove the credential stored under a key.
    pub fn remove(&self, key: &str) -> Result<(), CredentialStoreError> {
        self.db
            .conn()
            .execute("DELETE FROM credentials WHERE key = ?", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_db(tmp: &TempDir) -> Database {
        let db = Database::open_at(tmp.path().join("test.db")).unwrap();
        db.migrate().unwrap();
        db
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let db = test_db(&tmp);
        let store = CredentialStore::new(&db);

        store.save(AUTH_TOKEN_KEY, "EDL-abc123").unwrap();
        let loaded = store.load(AUTH_TOKEN_KEY).unwrap().unwrap();
        assert_eq!(loaded.value, "EDL-abc123");
    }

    #[test]
    fn save_replaces_existing_value() {
        let tmp = TempDir::new().unwrap();
        let db = test_db(&tmp);
        let store = CredentialStore::new(&db);

        store.save(AUTH_TOKEN_KEY, "first").unwrap();
        store.save(AUTH_TOKEN_KEY, "second").unwrap();
        let loaded = store.load(AUTH_TOKEN_KEY).unwrap().unwrap();
        assert_eq!(loaded.value, "second");
    }

    #[test]
    fn remove_deletes_credential() {
        let tmp = TempDir::new().unwrap();
        let db = test_db(&tmp);
        let store = CredentialStore::new(&db);

        store.save(AUTH_TOKEN_KEY, "EDL-abc123").unwrap();
        store.remove(AUTH_TOKEN_KEY).unwrap();
        assert!(store.load(AUTH_TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn load_missing_key_is_none() {
        let tmp = TempDir::new().unwrap();
        let db = test_db(&tmp);
        let store = CredentialStore::new(&db);

        assert!(store.load("unknown").unwrap().is_none());
    }
}
