//! Player actions and their outcomes.
//!
//! The transport decodes each inbound message into an `Action` and hands it
//! to `Session::apply` together with the acting player's ID. The returned
//! `Outcome` tells the transport what changed, so it can decide whom to
//! notify (e.g. `Played { table_complete: true }` means every room member
//! should now fetch the shuffled table).

use serde::{Deserialize, Serialize};

use super::card::CardId;

/// A single player action.
///
/// ```
/// use dixit_engine::core::{Action, ActionKind, CardId};
///
/// let tell = Action::Tell { card: CardId(12), description: "a long journey".into() };
/// assert_eq!(tell.kind(), ActionKind::Tell);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Join the lobby.
    Join,
    /// Deal and start the first turn.
    Start,
    /// Storyteller picks a card and gives a clue.
    Tell { card: CardId, description: String },
    /// Put a card from hand on the table.
    Play { card: CardId },
    /// Vote for a table card.
    Vote { card: CardId },
    /// Close the scored turn and deal.
    EndTurn,
}

impl Action {
    /// The kind of this action, without its payload.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Join => ActionKind::Join,
            Action::Start => ActionKind::Start,
            Action::Tell { .. } => ActionKind::Tell,
            Action::Play { .. } => ActionKind::Play,
            Action::Vote { .. } => ActionKind::Vote,
            Action::EndTurn => ActionKind::EndTurn,
        }
    }
}

/// Payload-free action discriminant, used in errors and status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Join,
    Start,
    Tell,
    Play,
    Vote,
    EndTurn,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::Join => "join",
            ActionKind::Start => "start",
            ActionKind::Tell => "tell",
            ActionKind::Play => "play",
            ActionKind::Vote => "vote",
            ActionKind::EndTurn => "end turn",
        };
        f.write_str(name)
    }
}

/// What an accepted action changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Player is on the roster (`newly_added` is false for a repeat join).
    Joined { newly_added: bool },
    /// Cards dealt; the first storyteller is up.
    Started,
    /// Clue recorded; the others may play.
    Told,
    /// Card placed. `table_complete` is true when this play opened voting.
    Played { table_complete: bool },
    /// Vote recorded. `all_voted` is true when this vote scored the turn.
    Voted { all_voted: bool },
    /// Turn archived. `game_over` is true when the pile ran out.
    TurnEnded { game_over: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kinds() {
        assert_eq!(Action::Join.kind(), ActionKind::Join);
        assert_eq!(Action::Start.kind(), ActionKind::Start);
        assert_eq!(Action::Play { card: CardId(1) }.kind(), ActionKind::Play);
        assert_eq!(Action::Vote { card: CardId(1) }.kind(), ActionKind::Vote);
        assert_eq!(Action::EndTurn.kind(), ActionKind::EndTurn);
    }

    #[test]
    fn test_action_wire_format() {
        let action: Action =
            serde_json::from_str(r#"{"action":"tell","card":5,"description":"dream"}"#).unwrap();
        assert_eq!(
            action,
            Action::Tell {
                card: CardId(5),
                description: "dream".to_string()
            }
        );

        let json = serde_json::to_string(&Outcome::Played { table_complete: true }).unwrap();
        assert_eq!(json, r#"{"outcome":"played","table_complete":true}"#);
    }
}
