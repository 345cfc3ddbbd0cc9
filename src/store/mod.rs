//! Session store: the room → session mapping.
//!
//! The engine has no global state. Whoever hosts rooms injects a
//! `SessionStore`, and each room's `Session` sits behind its own mutex so
//! actions in one room are serialized while rooms proceed independently.

pub mod memory;

use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

use crate::core::error::GameError;
use crate::session::Session;

pub use memory::InMemorySessionStore;

/// A session shared between the store and in-flight requests.
pub type SharedSession = Arc<Mutex<Session>>;

/// Errors from store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("room {0} already exists")]
    RoomExists(String),
    #[error("room {0} does not exist")]
    RoomNotFound(String),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Room-keyed session storage.
pub trait SessionStore: Send + Sync {
    /// Create a lobby session for `room`.
    fn create(&self, room: &str) -> Result<SharedSession, StoreError>;

    /// Look up a room's session.
    fn get(&self, room: &str) -> Option<SharedSession>;

    /// Drop a room's session, returning it if it existed.
    fn remove(&self, room: &str) -> Option<SharedSession>;

    /// Number of rooms.
    fn len(&self) -> usize;

    /// Room IDs, in no particular order.
    fn rooms(&self) -> Vec<String>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a room, creating it if missing.
    ///
    /// Retries only when a concurrent caller created the room between the
    /// lookup and the create; any other create error is returned.
    fn get_or_create(&self, room: &str) -> Result<SharedSession, StoreError> {
        loop {
            if let Some(session) = self.get(room) {
                return Ok(session);
            }
            match self.create(room) {
                Ok(session) => return Ok(session),
                Err(StoreError::RoomExists(_)) => continue,
                Err(other) => return Err(other),
            }
        }
    }

    /// Run `f` with the room's session locked.
    fn with_session<R, F>(&self, room: &str, f: F) -> Result<R, StoreError>
    where
        Self: Sized,
        F: FnOnce(&mut Session) -> Result<R, GameError>,
    {
        let session = self
            .get(room)
            .ok_or_else(|| StoreError::RoomNotFound(room.to_string()))?;
        let mut guard = session.lock();
        Ok(f(&mut guard)?)
    }
}
