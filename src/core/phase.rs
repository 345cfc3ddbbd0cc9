//! Session phases.

use serde::{Deserialize, Serialize};

/// The phase a session is in. Exactly one is active at a time.
///
/// `Lobby → Tell → Play → Vote → EndTurn → Tell …`, leaving the loop only
/// through `EndTurn → EndGame`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Players are joining; no cards dealt.
    #[default]
    Lobby,
    /// Waiting for the storyteller's card and clue.
    Tell,
    /// Waiting for every other player to put a card on the table.
    Play,
    /// Waiting for every other player to vote.
    Vote,
    /// Turn scored; waiting for the host to advance.
    EndTurn,
    /// Pile exhausted. Terminal.
    EndGame,
}

impl Phase {
    /// Whether the shuffled table is visible in this phase.
    #[must_use]
    pub const fn table_revealed(self) -> bool {
        matches!(self, Phase::Vote | Phase::EndTurn | Phase::EndGame)
    }

    /// Whether a turn is in progress.
    #[must_use]
    pub const fn in_turn(self) -> bool {
        matches!(self, Phase::Tell | Phase::Play | Phase::Vote | Phase::EndTurn)
    }

    /// Whether no further phase change can happen.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::EndGame)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Lobby => "lobby",
            Phase::Tell => "tell",
            Phase::Play => "play",
            Phase::Vote => "vote",
            Phase::EndTurn => "end_turn",
            Phase::EndGame => "end_game",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_predicates() {
        assert!(!Phase::Play.table_revealed());
        assert!(Phase::Vote.table_revealed());
        assert!(Phase::EndGame.table_revealed());

        assert!(!Phase::Lobby.in_turn());
        assert!(Phase::EndTurn.in_turn());
        assert!(!Phase::EndGame.in_turn());

        assert!(Phase::EndGame.is_terminal());
        assert!(!Phase::EndTurn.is_terminal());
    }

    #[test]
    fn test_phase_wire_names() {
        assert_eq!(serde_json::to_string(&Phase::EndTurn).unwrap(), "\"end_turn\"");
        let phase: Phase = serde_json::from_str("\"end_game\"").unwrap();
        assert_eq!(phase, Phase::EndGame);
        assert_eq!(Phase::EndTurn.to_string(), "end_turn");
    }
}
