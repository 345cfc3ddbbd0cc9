//! In-memory session store.

use chrono::{DateTime, Utc};
use log::info;
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::{SessionStore, SharedSession, StoreError};
use crate::core::config::SessionConfig;
use crate::session::Session;

/// Process-local store. Every room is created with the same config.
///
/// ```
/// use dixit_engine::core::PlayerId;
/// use dixit_engine::store::{InMemorySessionStore, SessionStore};
///
/// let store = InMemorySessionStore::default();
/// store.create("room-1").unwrap();
///
/// let joined = store
///     .with_session("room-1", |s| s.add_player(PlayerId::new("ana")))
///     .unwrap();
/// assert!(joined);
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    config: SessionConfig,
    sessions: RwLock<FxHashMap<String, SharedSession>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(FxHashMap::default()),
        }
    }

    /// Config new rooms are created with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Rooms with no accepted action since `cutoff`.
    ///
    /// For an external eviction sweep; the store never evicts on its own.
    #[must_use]
    pub fn idle_since(&self, cutoff: DateTime<Utc>) -> Vec<String> {
        self.sessions
            .read()
            .iter()
            .filter(|(_, session)| session.lock().last_activity() < cutoff)
            .map(|(room, _)| room.clone())
            .collect()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, room: &str) -> Result<SharedSession, StoreError> {
        let mut sessions = self.sessions.write();
        if sessions.contains_key(room) {
            return Err(StoreError::RoomExists(room.to_string()));
        }

        let session = Arc::new(Mutex::new(Session::new(self.config.clone())));
        sessions.insert(room.to_string(), Arc::clone(&session));
        info!("room {} created ({} rooms)", room, sessions.len());
        Ok(session)
    }

    fn get(&self, room: &str) -> Option<SharedSession> {
        self.sessions.read().get(room).cloned()
    }

    fn remove(&self, room: &str) -> Option<SharedSession> {
        let removed = self.sessions.write().remove(room);
        if removed.is_some() {
            info!("room {} removed", room);
        }
        removed
    }

    fn len(&self) -> usize {
        self.sessions.read().len()
    }

    fn rooms(&self) -> Vec<String> {
        self.sessions.read().keys().cloned().collect()
    }
}
