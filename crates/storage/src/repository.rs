use async_trait::async_trait;
use interview_core::model::{Session, SessionId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),
}

/// Shared handle to one session.
///
/// The async mutex is the per-session serialization scope: whoever holds the guard
/// owns the session's read-modify-write, including across awaits.
pub type SessionHandle = Arc<tokio::sync::Mutex<Session>>;

/// Repository contract for interview sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Register a freshly created session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if a session with the same id already exists.
    async fn insert(&self, session: Session) -> Result<SessionHandle, StorageError>;

    /// Fetch the handle for a session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the id is unknown.
    async fn get(&self, id: SessionId) -> Result<SessionHandle, StorageError>;

    /// Number of live sessions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the registry cannot be read.
    async fn count(&self) -> Result<usize, StorageError>;
}

/// Process-lifetime session registry.
///
/// The registry lock only guards the id map and is never held across an await;
/// each session carries its own lock.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    sessions: Arc<Mutex<HashMap<SessionId, SessionHandle>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn insert(&self, session: Session) -> Result<SessionHandle, StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let id = session.id();
        if guard.contains_key(&id) {
            return Err(StorageError::Conflict);
        }
        let handle: SessionHandle = Arc::new(tokio::sync::Mutex::new(session));
        guard.insert(id, Arc::clone(&handle));
        tracing::debug!(session_id = %id, sessions = guard.len(), "session registered");
        Ok(handle)
    }

    async fn get(&self, id: SessionId) -> Result<SessionHandle, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn count(&self) -> Result<usize, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.len())
    }
}
