//! Card identification.
//!
//! Dixit cards carry no rules data: each one is just a picture. The engine
//! models a card as an opaque number drawn from `1..=deck_size`, and the
//! presentation layer maps numbers to artwork.

use serde::{Deserialize, Serialize};

/// Number of cards in the reference game.
pub const DEFAULT_DECK_SIZE: u16 = 84;

/// Identifier of one physical card.
///
/// Card IDs are 1-based: the first card is `CardId(1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Iterate over every card of a deck holding `deck_size` cards.
    ///
    /// ```
    /// use dixit_engine::core::CardId;
    ///
    /// let cards: Vec<_> = CardId::all(3).collect();
    /// assert_eq!(cards, vec![CardId(1), CardId(2), CardId(3)]);
    /// ```
    pub fn all(deck_size: u16) -> impl Iterator<Item = CardId> {
        (1..=deck_size).map(CardId)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card #{}", self.0)
    }
}
