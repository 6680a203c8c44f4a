//! Persisted session state.
//!
//! The session is a small JSON key-value file holding the bearer token and
//! the identity it was issued to. Presence of a token is what makes the
//! session authenticated; logout removes the whole file.

use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Session file name in the data directory
const SESSION_FILE: &str = "session.json";

/// The persistence substrate failed. Distinct from a missing key, which is
/// a normal result.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SessionFile {
    token: Option<String>,
    username: Option<String>,
    saved_at: Option<DateTime<Utc>>,
}

/// Key-value store for the persisted session, backed by a JSON file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    async fn read(&self) -> Result<SessionFile, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(SessionFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, file: &SessionFile) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(file)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }

    /// The stored bearer token, if any.
    pub async fn get_token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.read().await?.token)
    }

    /// Persist the bearer token.
    pub async fn set_token(&self, token: &str) -> Result<(), StorageError> {
        let mut file = self.read().await?;
        file.token = Some(token.to_string());
        file.saved_at = Some(Utc::now());
        self.write(&file).await?;
        debug!("token persisted");
        Ok(())
    }

    /// The identity the session was issued to, if any.
    pub async fn get_username(&self) -> Result<Option<String>, StorageError> {
        Ok(self.read().await?.username)
    }

    pub async fn set_username(&self, username: &str) -> Result<(), StorageError> {
        let mut file = self.read().await?;
        file.username = Some(username.to_string());
        self.write(&file).await?;
        Ok(())
    }

    /// Remove all persisted session state. Removing an already-absent
    /// session is a success.
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, SessionStore) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[tokio::test]
    async fn test_absent_token_is_none() {
        let (_dir, store) = store();
        assert_eq!(store.get_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_token_roundtrip() {
        let (_dir, store) = store();
        store.set_token("abc").await.unwrap();
        assert_eq!(store.get_token().await.unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_username_survives_token_write() {
        let (_dir, store) = store();
        store.set_username("alice@example.com").await.unwrap();
        store.set_token("abc").await.unwrap();
        assert_eq!(
            store.get_username().await.unwrap().as_deref(),
            Some("alice@example.com")
        );
    }

    #[tokio::test]
    async fn test_clear_all_removes_everything() {
        let (_dir, store) = store();
        store.set_token("abc").await.unwrap();
        store.set_username("alice@example.com").await.unwrap();
        store.clear_all().await.unwrap();
        assert_eq!(store.get_token().await.unwrap(), None);
        assert_eq!(store.get_username().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_all_when_empty_is_ok() {
        let (_dir, store) = store();
        store.clear_all().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_storage_error() {
        let (dir, store) = store();
        tokio::fs::write(dir.path().join("session.json"), "{not json")
            .await
            .unwrap();
        let err = store.get_token().await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
