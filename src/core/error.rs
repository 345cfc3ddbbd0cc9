//! Engine errors.
//!
//! Every rejected action returns a `GameError` and leaves the session
//! untouched. Variants are grouped into coarse `ErrorKind`s so the transport
//! can pick a response without matching every variant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::ActionKind;
use super::card::CardId;
use super::phase::Phase;
use super::player::PlayerId;

/// Errors returned by session and pile operations.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("can't {action} during the {phase} phase")]
    ActionImpossibleNow { action: ActionKind, phase: Phase },
    #[error("there must be between {min} and {max} players, got {count}")]
    NumberPlayers { count: usize, min: usize, max: usize },
    #[error("player {0} is not in this game")]
    UnknownPlayer(PlayerId),
    #[error("only the storyteller can tell")]
    NotStoryteller,
    #[error("the storyteller can't {0}")]
    StorytellerCannot(ActionKind),
    #[error("player {0} already played a card this turn")]
    AlreadyPlayed(PlayerId),
    #[error("{card} is not in {player}'s hand")]
    CardNotInHand { player: PlayerId, card: CardId },
    #[error("{0} is not on the table")]
    CardNotOnTable(CardId),
    #[error("you can't vote for your own card")]
    OwnCard,
    #[error("description must be at least {min} characters long")]
    Description { min: usize },
    #[error("game ended: the pile can't deal another round")]
    GameEnded,
    #[error("invalid game state: {0}")]
    InternalState(String),
}

/// Coarse classification of a `GameError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Wrong player count, or a player not on the roster.
    Roster,
    /// Action outside its legal phase.
    Phase,
    /// Right phase, wrong player.
    Actor,
    /// Card not in hand, not on table, or own card.
    Card,
    /// Malformed clue.
    Content,
    /// Pile exhausted. Signals game end, not a bug.
    Terminal,
    /// Engine invariant broken. A defect.
    Internal,
}

impl GameError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::NumberPlayers { .. } | GameError::UnknownPlayer(_) => ErrorKind::Roster,
            GameError::ActionImpossibleNow { .. } => ErrorKind::Phase,
            GameError::NotStoryteller
            | GameError::StorytellerCannot(_)
            | GameError::AlreadyPlayed(_) => ErrorKind::Actor,
            GameError::CardNotInHand { .. } | GameError::CardNotOnTable(_) | GameError::OwnCard => {
                ErrorKind::Card
            }
            GameError::Description { .. } => ErrorKind::Content,
            GameError::GameEnded => ErrorKind::Terminal,
            GameError::InternalState(_) => ErrorKind::Internal,
        }
    }

    /// Whether the player caused this (as opposed to an engine defect).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.kind() != ErrorKind::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let phase = GameError::ActionImpossibleNow {
            action: ActionKind::Play,
            phase: Phase::Vote,
        };
        assert_eq!(phase.kind(), ErrorKind::Phase);
        assert_eq!(phase.to_string(), "can't play during the vote phase");

        assert_eq!(GameError::NotStoryteller.kind(), ErrorKind::Actor);
        assert_eq!(GameError::OwnCard.kind(), ErrorKind::Card);
        assert_eq!(GameError::Description { min: 3 }.kind(), ErrorKind::Content);
        assert_eq!(GameError::GameEnded.kind(), ErrorKind::Terminal);
        assert_eq!(
            GameError::NumberPlayers { count: 3, min: 4, max: 6 }.to_string(),
            "there must be between 4 and 6 players, got 3"
        );
    }

    #[test]
    fn test_only_internal_is_unrecoverable() {
        assert!(GameError::GameEnded.is_recoverable());
        assert!(GameError::UnknownPlayer(PlayerId::new("x")).is_recoverable());
        assert!(!GameError::InternalState("owner".into()).is_recoverable());
    }

    #[test]
    fn test_error_serializes_for_transport() {
        let err = GameError::CardNotInHand {
            player: PlayerId::new("alice"),
            card: CardId(9),
        };
        let json = serde_json::to_string(&err).unwrap();
        let back: GameError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
