//! Card pile and hand management.
//!
//! Owns the deck of unique card IDs: shuffles it once, deals rounds, and
//! tracks which cards each player holds. The session consults it for every
//! deal and every card leaving a hand.
//!
//! Running out of cards for a full round is the game's only end condition,
//! reported as `GameError::GameEnded`.

pub mod manager;

pub use manager::PileManager;
