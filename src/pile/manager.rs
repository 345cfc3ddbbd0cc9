//! Pile manager for the draw pile and player hands.
//!
//! The `PileManager` owns every card that is not on a table:
//! - The draw pile, an ordered stack shuffled once at game start
//! - One hand per player, in the order cards were received
//!
//! Cards leave the manager through `take_from_hand` (onto the table) and
//! never come back; there is no discard or reshuffle in Dixit.

use rustc_hash::FxHashMap;

use crate::core::card::CardId;
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

/// Tracks the draw pile and each player's hand.
///
/// ## Usage
///
/// ```
/// use dixit_engine::pile::PileManager;
/// use dixit_engine::core::{GameRng, PlayerId};
///
/// let roster = vec![PlayerId::new("a"), PlayerId::new("b")];
/// let mut pile = PileManager::new(10);
/// pile.shuffle(&mut GameRng::new(42));
/// pile.init_hands(&roster);
///
/// pile.deal_one_round(&roster).unwrap();
/// assert_eq!(pile.pile_len(), 8);
/// assert_eq!(pile.hand_len(&roster[0]), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PileManager {
    /// Draw pile. The last element is the top card.
    pile: Vec<CardId>,

    /// Cards held by each player.
    hands: FxHashMap<PlayerId, Vec<CardId>>,
}

impl PileManager {
    /// Create a manager holding cards `1..=deck_size` in order, with no hands.
    #[must_use]
    pub fn new(deck_size: u16) -> Self {
        Self {
            pile: CardId::all(deck_size).collect(),
            hands: FxHashMap::default(),
        }
    }

    /// Shuffle the draw pile.
    ///
    /// Called once when the game starts.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.pile);
    }

    /// Give every roster member an empty hand, discarding any previous hands.
    pub fn init_hands(&mut self, roster: &[PlayerId]) {
        self.hands = roster.iter().map(|p| (p.clone(), Vec::new())).collect();
    }

    /// Deal one card from the top of the pile to each player, in roster order.
    ///
    /// Fails with `GameEnded` without dealing anything when the pile cannot
    /// cover the whole roster.
    pub fn deal_one_round(&mut self, roster: &[PlayerId]) -> Result<(), GameError> {
        if self.pile.len() < roster.len() {
            return Err(GameError::GameEnded);
        }

        for player in roster {
            let card = self.pile.pop().ok_or(GameError::GameEnded)?;
            self.hands.entry(player.clone()).or_default().push(card);
        }

        Ok(())
    }

    /// Remove one card from a player's hand.
    ///
    /// Fails with `CardNotInHand` and leaves the hand untouched if the player
    /// does not hold the card (or has no hand at all).
    pub fn take_from_hand(&mut self, player: &PlayerId, card: CardId) -> Result<(), GameError> {
        let not_in_hand = || GameError::CardNotInHand {
            player: player.clone(),
            card,
        };

        let hand = self.hands.get_mut(player).ok_or_else(not_in_hand)?;
        let idx = hand.iter().position(|&c| c == card).ok_or_else(not_in_hand)?;
        hand.remove(idx);
        Ok(())
    }

    /// Get a player's hand, or `None` if they have not been given one.
    #[must_use]
    pub fn hand(&self, player: &PlayerId) -> Option<&[CardId]> {
        self.hands.get(player).map(Vec::as_slice)
    }

    /// Check whether a player holds a card.
    #[must_use]
    pub fn holds(&self, player: &PlayerId, card: CardId) -> bool {
        self.hands.get(player).is_some_and(|h| h.contains(&card))
    }

    /// Number of cards in a player's hand (0 if unknown).
    #[must_use]
    pub fn hand_len(&self, player: &PlayerId) -> usize {
        self.hands.get(player).map_or(0, Vec::len)
    }

    /// Number of cards left in the draw pile.
    #[must_use]
    pub fn pile_len(&self) -> usize {
        self.pile.len()
    }

    /// Total number of cards held across all hands.
    #[must_use]
    pub fn cards_in_hands(&self) -> usize {
        self.hands.values().map(Vec::len).sum()
    }
}
