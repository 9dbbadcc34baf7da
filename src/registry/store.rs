//! Session registry implementation

use std::collections::HashMap;

use tokio::sync::{Mutex, MutexGuard};

use super::error::RegistryError;
use super::key::StreamId;
use super::session::Session;

/// Registry of active sessions, guarded by a single lock
///
/// All access goes through [`SessionRegistry::lock`]. The lock is a
/// `tokio::sync::Mutex` because handlers keep it across awaits.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<StreamId, Session>>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire exclusive access to the registry
    ///
    /// Waits for any handler currently holding the guard to finish.
    pub async fn lock(&self) -> RegistryGuard<'_> {
        RegistryGuard {
            sessions: self.sessions.lock().await,
        }
    }

    /// Number of active sessions
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

/// Exclusive access to the registry contents
pub struct RegistryGuard<'a> {
    sessions: MutexGuard<'a, HashMap<StreamId, Session>>,
}

impl RegistryGuard<'_> {
    /// Record a session for its stream
    ///
    /// Fails if the stream already has a session; the existing one is kept.
    pub fn register(&mut self, session: Session) -> Result<(), RegistryError> {
        let key = session.stream_id().clone();
        if self.sessions.contains_key(&key) {
            return Err(RegistryError::AlreadyActive(key));
        }

        tracing::debug!(stream = %key, name = session.display_name(), "Session registered");
        self.sessions.insert(key, session);
        Ok(())
    }

    /// Remove the stream's session and hand it to the caller
    pub fn remove_and_take(&mut self, stream: &StreamId) -> Option<Session> {
        let session = self.sessions.remove(stream);
        if session.is_some() {
            tracing::debug!(stream = %stream, "Session removed");
        }
        session
    }

    /// Check whether the stream has an active session
    pub fn contains(&self, stream: &StreamId) -> bool {
        self.sessions.contains_key(stream)
    }

    pub fn get(&self, stream: &StreamId) -> Option<&Session> {
        self.sessions.get(stream)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
