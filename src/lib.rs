//! # dixit-engine
//!
//! Authoritative session engine for Dixit, the storytelling card game for
//! 4-6 players.
//!
//! ## Design Principles
//!
//! 1. **Server Authority**: Hands and table ownership live only here. Each
//!    query returns what one player is allowed to see.
//!
//! 2. **Synchronous Steps**: Every action is one call that validates, then
//!    mutates, then returns. Rejected actions change nothing.
//!
//! 3. **No Ambient State**: Sessions are owned by an injected
//!    `SessionStore`; the engine holds no globals.
//!
//! ## Turn Lifecycle
//!
//! - **tell**: the storyteller picks a card and gives a clue
//! - **play**: everyone else puts a matching card on the table
//! - **vote**: the table is shuffled once; everyone else guesses
//! - **end_turn**: scores are in; closing the turn deals one card each
//!
//! The game ends when the pile can no longer deal a full round.
//!
//! ## Modules
//!
//! - `core`: Player and card IDs, phases, actions, errors, RNG, configuration
//! - `pile`: Draw pile and hands
//! - `session`: The state machine, turns, scoring, status payloads
//! - `store`: Room → session storage

pub mod core;
pub mod pile;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, CardId, ErrorKind, GameError, GameRng, Outcome, Phase, PlayerId,
    SessionConfig,
};

pub use crate::pile::PileManager;

pub use crate::session::{
    score_turn, Ballot, PhaseStatus, Points, Session, SessionStats, Status, TableEntry, Turn,
    TurnRecord, TurnSummary,
};

pub use crate::store::{InMemorySessionStore, SessionStore, SharedSession, StoreError};
