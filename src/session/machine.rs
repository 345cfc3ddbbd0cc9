//! The game session state machine.
//!
//! A `Session` is the aggregate root for one room: roster, pile and hands,
//! phase, current turn, scores and history. Every public mutator is a single
//! validate-then-mutate step: either it fails and nothing changed, or it
//! succeeds and the state is consistent again. The caller guarantees that no
//! two operations run concurrently on the same session.

use chrono::{DateTime, Utc};
use im::Vector;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::scoring::score_turn;
use super::status::{PhaseStatus, Status};
use super::turn::{Ballot, Points, Turn, TurnRecord};
use crate::core::action::{Action, ActionKind, Outcome};
use crate::core::card::CardId;
use crate::core::config::SessionConfig;
use crate::core::error::GameError;
use crate::core::phase::Phase;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::pile::PileManager;

/// Aggregate statistics for a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub points: Points,
    pub turns_played: u32,
    pub cards_left: usize,
}

/// One room's game.
///
/// Cloning is cheap: the turn history is a persistent vector, so a clone can
/// be handed to a broadcaster as a snapshot.
///
/// ## Example
///
/// ```
/// use dixit_engine::core::{Phase, PlayerId, SessionConfig};
/// use dixit_engine::session::Session;
///
/// let mut session = Session::new(SessionConfig::default());
/// for id in ["ana", "bo", "cy", "di"] {
///     session.add_player(PlayerId::new(id)).unwrap();
/// }
/// session.start_game().unwrap();
///
/// assert_eq!(session.phase(), Phase::Tell);
/// let storyteller = session.storyteller().unwrap().clone();
/// assert!(session.get_status(&storyteller).action_needed);
/// assert_eq!(session.get_hand(&storyteller).unwrap().len(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    phase: Phase,
    /// Arrival order in the lobby, shuffled once at start.
    roster: Vec<PlayerId>,
    pile: PileManager,
    scores: Points,
    history: Vector<TurnRecord>,
    current: Option<Turn>,
    /// Index into `roster` of the current storyteller.
    cursor: usize,
    rng: GameRng,
}

impl Session {
    /// Create a session in the lobby.
    ///
    /// The RNG is seeded from OS entropy unless the config pins a seed in
    /// debug mode.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.effective_seed() {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a session in the lobby with an explicit RNG.
    #[must_use]
    pub fn with_rng(config: SessionConfig, rng: GameRng) -> Self {
        let now = Utc::now();
        Self {
            pile: PileManager::new(config.deck_size),
            config,
            created_at: now,
            last_activity: now,
            phase: Phase::Lobby,
            roster: Vec::new(),
            scores: Points::default(),
            history: Vector::new(),
            current: None,
            cursor: 0,
            rng,
        }
    }

    // === Mutators ===

    /// Dispatch a decoded player action.
    pub fn apply(&mut self, player: &PlayerId, action: Action) -> Result<Outcome, GameError> {
        match action {
            Action::Join => self
                .add_player(player.clone())
                .map(|newly_added| Outcome::Joined { newly_added }),
            Action::Start => self.start_game().map(|()| Outcome::Started),
            Action::Tell { card, description } => {
                self.tell(player, card, &description).map(|()| Outcome::Told)
            }
            Action::Play { card } => self
                .play(player, card)
                .map(|table_complete| Outcome::Played { table_complete }),
            Action::Vote { card } => self
                .vote(player, card)
                .map(|all_voted| Outcome::Voted { all_voted }),
            Action::EndTurn => self
                .end_turn()
                .map(|game_over| Outcome::TurnEnded { game_over }),
        }
    }

    /// Add a player to the lobby.
    ///
    /// Idempotent: returns `Ok(false)` if the player is already on the
    /// roster, in any phase. New players can only join in the lobby.
    pub fn add_player(&mut self, player: PlayerId) -> Result<bool, GameError> {
        if self.roster.contains(&player) {
            return Ok(false);
        }
        self.require_phase(Phase::Lobby, ActionKind::Join)?;

        debug!("player {} joined ({} in lobby)", player, self.roster.len() + 1);
        self.scores.insert(player.clone(), 0);
        self.roster.push(player);
        self.touch();
        Ok(true)
    }

    /// Deal and open the first turn.
    ///
    /// Shuffles the roster (fixing the storyteller rotation for the whole
    /// session) and the pile, then deals a full hand to everyone.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        self.require_phase(Phase::Lobby, ActionKind::Start)?;

        let range = self.config.player_range();
        let count = self.roster.len();
        if !range.contains(&count) {
            return Err(GameError::NumberPlayers {
                count,
                min: *range.start(),
                max: *range.end(),
            });
        }

        let mut roster = self.roster.clone();
        self.rng.shuffle(&mut roster);

        let mut pile = PileManager::new(self.config.deck_size);
        pile.shuffle(&mut self.rng);
        pile.init_hands(&roster);
        for _ in 0..self.config.hand_size {
            pile.deal_one_round(&roster)?;
        }

        self.current = Some(Turn::new(roster[0].clone()));
        self.roster = roster;
        self.pile = pile;
        self.cursor = 0;
        self.phase = Phase::Tell;
        self.touch();

        info!(
            "game started with {} players, {} cards left in the pile",
            count,
            self.pile.pile_len()
        );
        Ok(())
    }

    /// Storyteller picks a card and gives the clue.
    pub fn tell(&mut self, player: &PlayerId, card: CardId, description: &str) -> Result<(), GameError> {
        self.require_phase(Phase::Tell, ActionKind::Tell)?;
        if Some(player) != self.storyteller() {
            return Err(GameError::NotStoryteller);
        }

        let description = description.trim();
        if description.chars().count() < self.config.min_description_len {
            return Err(GameError::Description {
                min: self.config.min_description_len,
            });
        }

        self.pile.take_from_hand(player, card)?;
        self.turn_mut()?.record_tell(card, description.to_string());
        self.phase = Phase::Play;
        self.touch();

        debug!("storyteller {} told", player);
        Ok(())
    }

    /// Put a card on the table.
    ///
    /// Returns `true` when this was the last card: the table is then shuffled
    /// once and voting opens.
    pub fn play(&mut self, player: &PlayerId, card: CardId) -> Result<bool, GameError> {
        self.require_phase(Phase::Play, ActionKind::Play)?;
        self.require_member(player)?;

        let turn = self.turn()?;
        if turn.storyteller() == player {
            return Err(GameError::StorytellerCannot(ActionKind::Play));
        }
        if turn.has_played(player) {
            return Err(GameError::AlreadyPlayed(player.clone()));
        }

        self.pile.take_from_hand(player, card)?;

        let roster_len = self.roster.len();
        let turn = self.current.as_mut().ok_or_else(no_turn)?;
        turn.record_play(player.clone(), card);
        debug!("player {} played ({}/{})", player, turn.table().len(), roster_len);

        let complete = turn.table().len() == roster_len;
        if complete {
            turn.shuffle_table(&mut self.rng);
            self.phase = Phase::Vote;
            info!("all cards on the table, voting opens");
        }
        self.touch();
        Ok(complete)
    }

    /// Shuffled table cards, once voting has opened.
    ///
    /// Empty before `vote`. In `end_game` this is the last turn's table.
    #[must_use]
    pub fn get_table(&self) -> Vec<CardId> {
        if !self.phase.table_revealed() {
            return Vec::new();
        }
        match (&self.current, self.history.last()) {
            (Some(turn), _) => turn.table().iter().map(|e| e.card).collect(),
            (None, Some(record)) => record.table_cards(),
            (None, None) => Vec::new(),
        }
    }

    /// Vote for a table card.
    ///
    /// A repeat vote replaces the player's earlier one. Returns `true` when
    /// this was the last missing vote: the turn is then scored.
    pub fn vote(&mut self, player: &PlayerId, card: CardId) -> Result<bool, GameError> {
        self.require_phase(Phase::Vote, ActionKind::Vote)?;
        self.require_member(player)?;

        let turn = self.turn()?;
        if turn.storyteller() == player {
            return Err(GameError::StorytellerCannot(ActionKind::Vote));
        }
        if turn.card_of(player) == Some(card) {
            return Err(GameError::OwnCard);
        }
        if !turn.is_on_table(card) {
            return Err(GameError::CardNotOnTable(card));
        }

        let mut votes: Vec<Ballot> = turn.votes().to_vec();
        match votes.iter_mut().find(|b| &b.voter == player) {
            Some(ballot) => ballot.card = card,
            None => votes.push(Ballot {
                voter: player.clone(),
                card,
            }),
        }

        let all_voted = votes.len() == self.roster.len() - 1;
        let points = if all_voted {
            Some(score_turn(&self.roster, turn.storyteller(), turn.table(), &votes)?)
        } else {
            None
        };

        let turn = self.current.as_mut().ok_or_else(no_turn)?;
        turn.record_vote(player.clone(), card);
        debug!("player {} voted", player);

        if let Some(points) = points {
            for (id, delta) in &points {
                *self.scores.entry(id.clone()).or_default() += delta;
            }
            turn.set_points(points);
            self.phase = Phase::EndTurn;
            info!("turn {} scored", self.history.len() + 1);
        }
        self.touch();
        Ok(all_voted)
    }

    /// Archive the scored turn and deal the next round.
    ///
    /// Returns `true` when the pile could not cover another round: the game
    /// is over and hands are left as they were.
    pub fn end_turn(&mut self) -> Result<bool, GameError> {
        self.require_phase(Phase::EndTurn, ActionKind::EndTurn)?;

        let number = self.turn_number();
        let record = self.turn()?.clone().seal(number)?;

        let game_over = match self.pile.deal_one_round(&self.roster) {
            Ok(()) => false,
            Err(GameError::GameEnded) => true,
            Err(other) => return Err(other),
        };

        self.history.push_back(record);
        if game_over {
            self.current = None;
            self.phase = Phase::EndGame;
            info!("game over after {} turns", number);
        } else {
            self.cursor = (self.cursor + 1) % self.roster.len();
            self.current = Some(Turn::new(self.roster[self.cursor].clone()));
            self.phase = Phase::Tell;
            debug!("turn {} closed, {} is the storyteller", number, self.roster[self.cursor]);
        }
        self.touch();
        Ok(game_over)
    }

    // === Queries ===

    /// What is going on and whether `player` needs to act.
    #[must_use]
    pub fn get_status(&self, player: &PlayerId) -> Status {
        let is_member = self.roster.contains(player);
        let action_needed = self.pending_players().contains(player);
        let turn_number = self.turn_number();

        let (detail, message) = match (self.phase, &self.current) {
            (Phase::Lobby, _) => {
                let message = if is_member {
                    format!("Waiting for the game to start ({} players joined)", self.roster.len())
                } else {
                    "Waiting to join a game".to_string()
                };
                let detail = PhaseStatus::Lobby {
                    players: self.roster.len(),
                    min_players: *self.config.player_range().start(),
                };
                (detail, message)
            }
            (Phase::EndGame, _) | (_, None) => {
                let detail = PhaseStatus::EndGame {
                    turns_played: self.history.len() as u32,
                };
                (detail, "Game over".to_string())
            }
            (phase, Some(turn)) => {
                let storyteller = turn.storyteller().clone();
                let is_storyteller = &storyteller == player;
                let description = turn.description().unwrap_or_default().to_string();
                let expected = self.roster.len().saturating_sub(1);

                let message = if !is_member {
                    "This game is already in progress".to_string()
                } else {
                    match phase {
                        Phase::Tell if is_storyteller => {
                            "You are the storyteller: choose a card and tell a story about it".to_string()
                        }
                        Phase::Tell => "Wait for the storyteller to tell a story".to_string(),
                        Phase::Play if action_needed => format!(
                            "The storyteller said \"{}\". Choose the card from your hand that best matches it",
                            description
                        ),
                        Phase::Play => "Wait for the other players to choose their cards".to_string(),
                        Phase::Vote if action_needed => format!(
                            "Vote for the card you think the storyteller chose for \"{}\"",
                            description
                        ),
                        Phase::Vote => "Wait for the other players to vote".to_string(),
                        _ => "Turn over: check the results".to_string(),
                    }
                };

                let detail = match phase {
                    Phase::Tell => PhaseStatus::Tell {
                        turn: turn_number,
                        storyteller,
                    },
                    Phase::Play => PhaseStatus::Play {
                        turn: turn_number,
                        storyteller,
                        description,
                        played: turn.table().len().saturating_sub(1),
                        expected,
                    },
                    Phase::Vote => PhaseStatus::Vote {
                        turn: turn_number,
                        storyteller,
                        description,
                        voted: turn.votes().len(),
                        expected,
                    },
                    _ => PhaseStatus::EndTurn {
                        turn: turn_number,
                        storyteller,
                    },
                };
                (detail, message)
            }
        };

        Status {
            detail,
            message,
            action_needed,
        }
    }

    /// Roster members the current phase is waiting on.
    #[must_use]
    pub fn pending_players(&self) -> Vec<PlayerId> {
        let Some(turn) = &self.current else {
            return Vec::new();
        };
        let guessers = self.roster.iter().filter(|p| *p != turn.storyteller());

        match self.phase {
            Phase::Tell => vec![turn.storyteller().clone()],
            Phase::Play => guessers.filter(|p| !turn.has_played(p)).cloned().collect(),
            Phase::Vote => guessers.filter(|p| turn.vote_of(p).is_none()).cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// A player's hand. Empty in the lobby.
    pub fn get_hand(&self, player: &PlayerId) -> Result<&[CardId], GameError> {
        self.require_member(player)?;
        Ok(self.pile.hand(player).unwrap_or_default())
    }

    /// Cumulative points of every roster member.
    #[must_use]
    pub fn get_points(&self) -> Points {
        self.roster
            .iter()
            .map(|p| (p.clone(), self.scores.get(p).copied().unwrap_or(0)))
            .collect()
    }

    /// The most recently sealed turn.
    #[must_use]
    pub fn get_last_turn(&self) -> Option<&TurnRecord> {
        self.history.last()
    }

    /// Roster ordered by descending score, ties in rotation order.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<(PlayerId, u32)> {
        let points = self.get_points();
        let mut board: Vec<_> = self
            .roster
            .iter()
            .map(|p| (p.clone(), points.get(p).copied().unwrap_or(0)))
            .collect();
        board.sort_by(|a, b| b.1.cmp(&a.1));
        board
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            points: self.get_points(),
            turns_played: self.history.len() as u32,
            cards_left: self.pile.pile_len(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Roster in rotation order (arrival order while in the lobby).
    #[must_use]
    pub fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The in-progress turn, if any.
    #[must_use]
    pub fn current_turn(&self) -> Option<&Turn> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn storyteller(&self) -> Option<&PlayerId> {
        self.current.as_ref().map(Turn::storyteller)
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.current.as_ref().and_then(Turn::description)
    }

    /// Sealed turns, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    /// 1-based number of the current turn (or of the last one once over).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        let sealed = self.history.len() as u32;
        if self.current.is_some() {
            sealed + 1
        } else {
            sealed
        }
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn pile_len(&self) -> usize {
        self.pile.pile_len()
    }

    /// Cards currently held across all hands.
    #[must_use]
    pub fn cards_in_hands(&self) -> usize {
        self.pile.cards_in_hands()
    }

    /// Cards on the current table plus every archived table.
    #[must_use]
    pub fn cards_on_tables(&self) -> usize {
        let archived: usize = self.history.iter().map(|t| t.table.len()).sum();
        archived + self.current.as_ref().map_or(0, |t| t.table().len())
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last accepted mutation.
    #[must_use]
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    // === Helpers ===

    fn require_phase(&self, phase: Phase, action: ActionKind) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::ActionImpossibleNow {
                action,
                phase: self.phase,
            })
        }
    }

    fn require_member(&self, player: &PlayerId) -> Result<(), GameError> {
        if self.roster.contains(player) {
            Ok(())
        } else {
            Err(GameError::UnknownPlayer(player.clone()))
        }
    }

    fn turn(&self) -> Result<&Turn, GameError> {
        self.current.as_ref().ok_or_else(no_turn)
    }

    fn turn_mut(&mut self) -> Result<&mut Turn, GameError> {
        self.current.as_mut().ok_or_else(no_turn)
    }

    fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}

fn no_turn() -> GameError {
    GameError::InternalState("no turn in progress".to_string())
}
