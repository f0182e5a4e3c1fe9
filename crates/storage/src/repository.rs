use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// The two durable entries that make up a persisted login.
///
/// They are stored, read and removed independently: nothing ties a token to
/// the profile written next to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionKey {
    /// Raw bearer token.
    Token,
    /// JSON-serialized student profile.
    StudentData,
}

impl SessionKey {
    pub const ALL: [SessionKey; 2] = [SessionKey::Token, SessionKey::StudentData];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKey::Token => "token",
            SessionKey::StudentData => "studentData",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository contract for persisted session entries.
#[async_trait]
pub trait SessionEntryRepository: Send + Sync {
    /// Read one entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read. A missing entry is `Ok(None)`.
    async fn get_entry(&self, key: SessionKey) -> Result<Option<String>, StorageError>;

    /// Write (or overwrite) one entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be stored.
    async fn put_entry(&self, key: SessionKey, value: &str) -> Result<(), StorageError>;

    /// Remove one entry. Removing a missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove_entry(&self, key: SessionKey) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<SessionKey, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SessionEntryRepository for InMemoryRepository {
    async fn get_entry(&self, key: SessionKey) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }

    async fn put_entry(&self, key: SessionKey, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key, value.to_owned());
        Ok(())
    }

    async fn remove_entry(&self, key: SessionKey) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&key);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub session: Arc<dyn SessionEntryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let session: Arc<dyn SessionEntryRepository> = Arc::new(InMemoryRepository::new());
        Self { session }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn entries_are_independent() {
        let repo = InMemoryRepository::new();
        repo.put_entry(SessionKey::Token, "abc").await.unwrap();

        assert_eq!(
            repo.get_entry(SessionKey::Token).await.unwrap().as_deref(),
            Some("abc")
        );
        assert_eq!(repo.get_entry(SessionKey::StudentData).await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let repo = InMemoryRepository::new();
        repo.put_entry(SessionKey::StudentData, "{}").await.unwrap();
        repo.remove_entry(SessionKey::StudentData).await.unwrap();
        repo.remove_entry(SessionKey::StudentData).await.unwrap();
        assert_eq!(repo.get_entry(SessionKey::StudentData).await.unwrap(), None);
    }

    #[test]
    fn keys_match_browser_storage_names() {
        assert_eq!(SessionKey::Token.as_str(), "token");
        assert_eq!(SessionKey::StudentData.to_string(), "studentData");
    }
}
