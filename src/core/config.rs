//! Session configuration.
//!
//! A `SessionConfig` is fixed when a session is created. The defaults are the
//! rules of the published game. Only the player bounds and the fixed seed are
//! gated on `debug`, so a production room cannot be started outside the 4-6
//! player range or with a predictable deal by accident. Deck size, hand size
//! and the clue length apply in every mode.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::card::DEFAULT_DECK_SIZE;

/// Smallest table the engine can run: one storyteller and one guesser.
pub const DEBUG_MIN_PLAYERS: usize = 2;

/// Configuration for one game session.
///
/// Deserializable so the hosting service can load it from its own config
/// file. Missing fields fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fewest players allowed at `start_game`.
    pub min_players: usize,

    /// Most players allowed at `start_game`.
    pub max_players: usize,

    /// Cards each player holds after the initial deal.
    pub hand_size: usize,

    /// Number of unique cards in the deck.
    pub deck_size: u16,

    /// Minimum storyteller clue length, in characters after trimming.
    pub min_description_len: usize,

    /// Testing mode: honours custom player bounds and `seed`.
    pub debug: bool,

    /// Fixed RNG seed. Ignored unless `debug` is set.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_players: 4,
            max_players: 6,
            hand_size: 6,
            deck_size: DEFAULT_DECK_SIZE,
            min_description_len: 3,
            debug: false,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable debug/testing mode.
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    /// Fix the RNG seed (debug mode only).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the player bounds (debug mode only).
    #[must_use]
    pub fn with_player_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the deck size.
    #[must_use]
    pub fn with_deck_size(mut self, deck_size: u16) -> Self {
        self.deck_size = deck_size;
        self
    }

    /// Set the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Roster sizes accepted by `start_game`.
    ///
    /// Outside debug mode this is always the published 4-6 range, whatever
    /// the bound fields say. The upper bound is additionally capped by the
    /// number of full hands the deck can deal.
    #[must_use]
    pub fn player_range(&self) -> RangeInclusive<usize> {
        let defaults = Self::default();
        let (min, max) = if self.debug {
            (self.min_players.max(DEBUG_MIN_PLAYERS), self.max_players)
        } else {
            (defaults.min_players, defaults.max_players)
        };
        let deck_cap = usize::from(self.deck_size) / self.hand_size.max(1);
        min..=max.min(deck_cap)
    }

    /// Seed to use for a new session, if one is pinned.
    #[must_use]
    pub fn effective_seed(&self) -> Option<u64> {
        if self.debug {
            self.seed
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_published_rules() {
        let config = SessionConfig::default();
        assert_eq!(config.player_range(), 4..=6);
        assert_eq!(config.hand_size, 6);
        assert_eq!(config.deck_size, 84);
        assert_eq!(config.min_description_len, 3);
        assert!(!config.debug);
    }

    #[test]
    fn test_bounds_ignored_outside_debug() {
        let config = SessionConfig::new().with_player_bounds(2, 10).with_seed(7);
        assert_eq!(config.player_range(), 4..=6);
        assert_eq!(config.effective_seed(), None);
    }

    #[test]
    fn test_debug_bounds_and_seed() {
        let config = SessionConfig::new()
            .debug()
            .with_player_bounds(1, 8)
            .with_seed(7);
        // Lower bound never drops below a storyteller plus one guesser.
        assert_eq!(config.player_range(), 2..=8);
        assert_eq!(config.effective_seed(), Some(7));
    }

    #[test]
    fn test_deck_caps_player_count() {
        let config = SessionConfig::new()
            .debug()
            .with_player_bounds(2, 20)
            .with_deck_size(30);
        assert_eq!(config.player_range(), 2..=5);
    }

    #[test]
    fn test_deck_and_hand_size_apply_outside_debug() {
        let config = SessionConfig::new().with_deck_size(24).with_hand_size(5);
        assert!(!config.debug);
        assert_eq!(config.deck_size, 24);
        assert_eq!(config.hand_size, 5);
        // 24 cards deal at most four hands of five.
        assert_eq!(config.player_range(), 4..=4);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"debug": true, "seed": 3}"#).unwrap();
        assert!(config.debug);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.hand_size, 6);
        assert_eq!(config.deck_size, 84);
    }
}
