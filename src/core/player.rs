//! Player identification.
//!
//! The engine never assigns player identities itself. The identity layer
//! hands it an opaque, stable string per participant (typically a session
//! UUID) and the engine only compares and stores it. Display names are
//! resolved by the caller when a human-facing summary is needed.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Opaque, stable identifier for a participant in one session.
///
/// Ordering is lexicographic on the underlying string and only exists so
/// players can be stored in sorted collections for stable output.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a player ID from any string-like value.
    ///
    /// ```
    /// use dixit_engine::core::PlayerId;
    ///
    /// let alice = PlayerId::new("alice");
    /// assert_eq!(alice.as_str(), "alice");
    /// ```
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
