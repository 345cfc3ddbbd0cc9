//! Core engine types: players, cards, phases, actions, errors, RNG,
//! configuration.
//!
//! Everything here is plain data shared by the pile manager and the session
//! state machine. None of it depends on a particular transport.

pub mod player;
pub mod card;
pub mod phase;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use player::PlayerId;
pub use card::{CardId, DEFAULT_DECK_SIZE};
pub use phase::Phase;
pub use rng::GameRng;
pub use config::{SessionConfig, DEBUG_MIN_PLAYERS};
pub use action::{Action, ActionKind, Outcome};
pub use error::{ErrorKind, GameError};
