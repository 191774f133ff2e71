//! Session store
//!
//! Uuid-keyed in-memory store so handlers can look sessions up across
//! requests. Sessions are small (annotation state only) and clients
//! delete them when done; there is no background expiry.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::controller::ReadingSession;
use super::types::DisplayMode;

/// Thread-safe store of active reading sessions.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, ReadingSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new session, returning its identifier.
    pub async fn insert(&self, session: ReadingSession) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, session);
        id
    }

    /// Snapshot a session by id.
    pub async fn get(&self, id: &Uuid) -> Option<ReadingSession> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned()
    }

    /// Switch a session's mode, returning the updated snapshot.
    pub async fn set_mode(&self, id: &Uuid, mode: DisplayMode) -> Option<ReadingSession> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id)?;
        session.set_mode(mode);
        Some(session.clone())
    }

    /// Remove a session.
    pub async fn remove(&self, id: &Uuid) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
