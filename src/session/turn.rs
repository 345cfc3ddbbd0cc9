//! Turns: the in-progress `Turn` and the sealed `TurnRecord`.
//!
//! A `Turn` is opened when the session enters `tell` and accumulates the
//! clue, the table and the votes. Once scored and closed it is sealed into an
//! immutable `TurnRecord` and appended to the session history.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::card::CardId;
use crate::core::error::GameError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

/// Points gained per player, or cumulative points.
pub type Points = FxHashMap<PlayerId, u32>;

/// One card on the table and the player who put it there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub player: PlayerId,
    pub card: CardId,
}

/// One vote: which table card a guesser picked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub voter: PlayerId,
    pub card: CardId,
}

/// The turn currently being played.
///
/// Tables and ballots hold at most one entry per player, so they stay inline
/// for the usual 4-6 player game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    storyteller: PlayerId,
    description: Option<String>,
    table: SmallVec<[TableEntry; 6]>,
    votes: SmallVec<[Ballot; 6]>,
    points: Option<Points>,
    shuffled: bool,
}

impl Turn {
    /// Open a turn with an empty table.
    #[must_use]
    pub fn new(storyteller: PlayerId) -> Self {
        Self {
            storyteller,
            description: None,
            table: SmallVec::new(),
            votes: SmallVec::new(),
            points: None,
            shuffled: false,
        }
    }

    #[must_use]
    pub fn storyteller(&self) -> &PlayerId {
        &self.storyteller
    }

    /// The clue, once told.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Table entries: contribution order until voting opens, then the
    /// shuffled order.
    #[must_use]
    pub fn table(&self) -> &[TableEntry] {
        &self.table
    }

    #[must_use]
    pub fn votes(&self) -> &[Ballot] {
        &self.votes
    }

    /// Point deltas, once the turn is scored.
    #[must_use]
    pub fn points(&self) -> Option<&Points> {
        self.points.as_ref()
    }

    /// Whether the table has been shuffled for voting.
    #[must_use]
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// The card a player put on the table, if any.
    #[must_use]
    pub fn card_of(&self, player: &PlayerId) -> Option<CardId> {
        self.table.iter().find(|e| &e.player == player).map(|e| e.card)
    }

    #[must_use]
    pub fn has_played(&self, player: &PlayerId) -> bool {
        self.card_of(player).is_some()
    }

    #[must_use]
    pub fn is_on_table(&self, card: CardId) -> bool {
        self.table.iter().any(|e| e.card == card)
    }

    /// The card a player voted for, if any.
    #[must_use]
    pub fn vote_of(&self, player: &PlayerId) -> Option<CardId> {
        self.votes.iter().find(|b| &b.voter == player).map(|b| b.card)
    }

    pub(crate) fn record_tell(&mut self, card: CardId, description: String) {
        self.description = Some(description);
        self.table.push(TableEntry {
            player: self.storyteller.clone(),
            card,
        });
    }

    pub(crate) fn record_play(&mut self, player: PlayerId, card: CardId) {
        self.table.push(TableEntry { player, card });
    }

    /// Replace the contribution order with a random permutation.
    ///
    /// Only the first call has any effect.
    pub(crate) fn shuffle_table(&mut self, rng: &mut GameRng) {
        if self.shuffled {
            return;
        }
        rng.shuffle(&mut self.table);
        self.shuffled = true;
    }

    /// Record a vote, overwriting the voter's previous one.
    pub(crate) fn record_vote(&mut self, voter: PlayerId, card: CardId) {
        match self.votes.iter_mut().find(|b| b.voter == voter) {
            Some(ballot) => ballot.card = card,
            None => self.votes.push(Ballot { voter, card }),
        }
    }

    pub(crate) fn set_points(&mut self, points: Points) {
        self.points = Some(points);
    }

    /// Seal a scored turn into its history form.
    pub(crate) fn seal(self, number: u32) -> Result<TurnRecord, GameError> {
        let points = self
            .points
            .ok_or_else(|| GameError::InternalState(format!("turn {} sealed before scoring", number)))?;
        let description = self.description.ok_or_else(|| {
            GameError::InternalState(format!("turn {} sealed without a description", number))
        })?;

        Ok(TurnRecord {
            number,
            storyteller: self.storyteller,
            description,
            table: self.table.into_vec(),
            votes: self.votes.into_vec(),
            points,
        })
    }
}

/// A completed, scored turn. Never modified after sealing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based turn number within the session.
    pub number: u32,
    pub storyteller: PlayerId,
    pub description: String,
    /// Table in the shuffled order players voted on.
    pub table: Vec<TableEntry>,
    pub votes: Vec<Ballot>,
    /// Points each roster member gained this turn (zeros included).
    pub points: Points,
}

impl TurnRecord {
    /// Table card IDs in the order they were shown for voting.
    #[must_use]
    pub fn table_cards(&self) -> Vec<CardId> {
        self.table.iter().map(|e| e.card).collect()
    }

    /// The storyteller's card.
    #[must_use]
    pub fn storyteller_card(&self) -> Option<CardId> {
        self.table
            .iter()
            .find(|e| e.player == self.storyteller)
            .map(|e| e.card)
    }

    /// Points a player gained this turn.
    #[must_use]
    pub fn points_of(&self, player: &PlayerId) -> u32 {
        self.points.get(player).copied().unwrap_or(0)
    }

    /// Players who voted for `card`, in ballot order.
    pub fn voters_for(&self, card: CardId) -> impl Iterator<Item = &PlayerId> + '_ {
        self.votes
            .iter()
            .filter(move |b| b.card == card)
            .map(|b| &b.voter)
    }
}
