//! Per-player status payloads.
//!
//! `Session::get_status` answers "what is going on, and do I need to act?"
//! for one player. The phase-specific part is a tagged variant so the
//! transport can serialize it as-is.

use serde::{Deserialize, Serialize};

use crate::core::phase::Phase;
use crate::core::player::PlayerId;

/// Phase-specific status detail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PhaseStatus {
    Lobby {
        players: usize,
        min_players: usize,
    },
    Tell {
        turn: u32,
        storyteller: PlayerId,
    },
    Play {
        turn: u32,
        storyteller: PlayerId,
        description: String,
        played: usize,
        expected: usize,
    },
    Vote {
        turn: u32,
        storyteller: PlayerId,
        description: String,
        voted: usize,
        expected: usize,
    },
    EndTurn {
        turn: u32,
        storyteller: PlayerId,
    },
    EndGame {
        turns_played: u32,
    },
}

impl PhaseStatus {
    /// The phase this detail belongs to.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            PhaseStatus::Lobby { .. } => Phase::Lobby,
            PhaseStatus::Tell { .. } => Phase::Tell,
            PhaseStatus::Play { .. } => Phase::Play,
            PhaseStatus::Vote { .. } => Phase::Vote,
            PhaseStatus::EndTurn { .. } => Phase::EndTurn,
            PhaseStatus::EndGame { .. } => Phase::EndGame,
        }
    }
}

/// Status for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    #[serde(flatten)]
    pub detail: PhaseStatus,
    /// Guidance for the player.
    pub message: String,
    /// Whether the game is waiting on this player.
    pub action_needed: bool,
}

impl Status {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.detail.phase()
    }
}
