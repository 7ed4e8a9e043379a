//! In-memory session store.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::model::Session;
use super::store::{SessionStore, StoreError};

/// A [`SessionStore`] backed by a concurrent map.
///
/// Used by tests and the CLI. Supports blocking sessions and simulating an
/// unreachable backend.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<Uuid, Session>,
    offline: AtomicBool,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a session.
    pub fn insert(&self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    /// Marks a session as blocked. Returns `false` if it does not exist.
    pub fn block(&self, id: Uuid) -> bool {
        match self.sessions.get_mut(&id) {
            Some(mut session) => {
                session.is_blocked = true;
                true
            }
            None => false,
        }
    }

    /// When offline, every lookup fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get_session(&self, id: Uuid) -> Result<Session, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        self.sessions
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound)
    }
}
