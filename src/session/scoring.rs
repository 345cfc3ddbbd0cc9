//! Turn scoring.
//!
//! Let S be the storyteller and O the other players. Let V be the players in
//! O who voted for S's card.
//!
//! - If V is empty or V = O, the clue was too hard or too easy: every player
//!   in O gains 2 and S gains nothing.
//! - Otherwise S and every player in V gain 3, and each player in O who
//!   missed S's card gives 1 point to the owner of the card they voted for.

use log::error;

use super::turn::{Ballot, Points, TableEntry};
use crate::core::error::GameError;
use crate::core::player::PlayerId;

/// Storyteller's reward when some, but not all, players find the card.
pub const STORYTELLER_POINTS: u32 = 3;
/// Reward for finding the storyteller's card.
pub const FINDER_POINTS: u32 = 3;
/// Reward for every guesser when nobody or everybody finds the card.
pub const CONSOLATION_POINTS: u32 = 2;
/// Reward to a card's owner for each vote it draws away, in a partial find.
pub const DECOY_POINTS: u32 = 1;

/// Compute the point deltas for one turn.
///
/// Every roster member appears in the result, with 0 if they gained nothing.
/// Pure: the same roster, table and votes always give the same deltas.
///
/// Fails with `InternalState` if the storyteller has no table card, a guesser
/// has not voted, or a voted card does not have exactly one owner.
pub fn score_turn(
    roster: &[PlayerId],
    storyteller: &PlayerId,
    table: &[TableEntry],
    votes: &[Ballot],
) -> Result<Points, GameError> {
    let storyteller_card = table
        .iter()
        .find(|e| &e.player == storyteller)
        .map(|e| e.card)
        .ok_or_else(|| inconsistent(format!("storyteller {} has no card on the table", storyteller)))?;

    let mut points: Points = roster.iter().map(|p| (p.clone(), 0)).collect();

    let mut guesses = Vec::with_capacity(roster.len().saturating_sub(1));
    for player in roster.iter().filter(|p| *p != storyteller) {
        let card = votes
            .iter()
            .find(|b| &b.voter == player)
            .map(|b| b.card)
            .ok_or_else(|| inconsistent(format!("player {} has not voted", player)))?;
        guesses.push((player, card));
    }

    // Owners of wrongly voted cards, resolved even when no decoy points apply.
    let mut decoy_owners = Vec::with_capacity(guesses.len());
    for (player, card) in guesses.iter().filter(|(_, c)| *c != storyteller_card) {
        let mut owners = table.iter().filter(|e| e.card == *card);
        match (owners.next(), owners.next()) {
            (Some(entry), None) => decoy_owners.push(&entry.player),
            _ => {
                return Err(inconsistent(format!(
                    "could not find who placed {} voted by {}",
                    card, player
                )))
            }
        }
    }

    let finders = guesses.len() - decoy_owners.len();

    if finders == 0 || finders == guesses.len() {
        for (player, _) in &guesses {
            *points.entry((*player).clone()).or_default() += CONSOLATION_POINTS;
        }
    } else {
        *points.entry(storyteller.clone()).or_default() += STORYTELLER_POINTS;
        for (player, _) in guesses.iter().filter(|(_, c)| *c == storyteller_card) {
            *points.entry((*player).clone()).or_default() += FINDER_POINTS;
        }
        for owner in decoy_owners {
            *points.entry(owner.clone()).or_default() += DECOY_POINTS;
        }
    }

    Ok(points)
}

fn inconsistent(message: String) -> GameError {
    error!("scoring failed: {}", message);
    GameError::InternalState(message)
}
