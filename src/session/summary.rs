//! Human-readable turn summaries.
//!
//! The engine stores player IDs only. The identity layer owns display names,
//! so `TurnRecord::summary` takes a lookup closure and resolves names at
//! formatting time.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::turn::TurnRecord;
use crate::core::card::CardId;
use crate::core::player::PlayerId;

/// One table card in a summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub card: CardId,
    pub owner: String,
    pub is_storyteller: bool,
    /// Display names of the players who voted for this card.
    pub voters: Vec<String>,
    /// Points the owner gained this turn.
    pub points: u32,
}

/// A sealed turn with display names resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSummary {
    pub number: u32,
    pub storyteller: String,
    pub description: String,
    /// One line per table card, in the order shown for voting.
    pub lines: Vec<SummaryLine>,
}

impl TurnRecord {
    /// Resolve display names for this turn.
    ///
    /// ```
    /// use dixit_engine::core::{CardId, PlayerId};
    /// use dixit_engine::session::{Ballot, Points, TableEntry, TurnRecord};
    ///
    /// let record = TurnRecord {
    ///     number: 1,
    ///     storyteller: PlayerId::new("u1"),
    ///     description: "a quiet harbour".into(),
    ///     table: vec![
    ///         TableEntry { player: PlayerId::new("u1"), card: CardId(4) },
    ///         TableEntry { player: PlayerId::new("u2"), card: CardId(9) },
    ///     ],
    ///     votes: vec![Ballot { voter: PlayerId::new("u2"), card: CardId(4) }],
    ///     points: Points::default(),
    /// };
    ///
    /// let summary = record.summary(|id| format!("name-{}", id));
    /// assert_eq!(summary.storyteller, "name-u1");
    /// assert_eq!(summary.lines[0].voters, vec!["name-u2".to_string()]);
    /// ```
    pub fn summary<F>(&self, display_name: F) -> TurnSummary
    where
        F: Fn(&PlayerId) -> String,
    {
        let lines = self
            .table
            .iter()
            .map(|entry| SummaryLine {
                card: entry.card,
                owner: display_name(&entry.player),
                is_storyteller: entry.player == self.storyteller,
                voters: self.voters_for(entry.card).map(&display_name).collect(),
                points: self.points_of(&entry.player),
            })
            .collect();

        TurnSummary {
            number: self.number,
            storyteller: display_name(&self.storyteller),
            description: self.description.clone(),
            lines,
        }
    }
}

impl fmt::Display for TurnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Turn {}: {} told \"{}\"",
            self.number, self.storyteller, self.description
        )?;
        for line in &self.lines {
            let role = if line.is_storyteller { " (storyteller)" } else { "" };
            let voters = if line.voters.is_empty() {
                "no votes".to_string()
            } else {
                format!("voted by {}", line.voters.join(", "))
            };
            writeln!(
                f,
                "  {} from {}{}: {}, +{}",
                line.card, line.owner, role, voters, line.points
            )?;
        }
        Ok(())
    }
}
