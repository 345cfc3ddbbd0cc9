//! Game session state machine.
//!
//! ## Key Types
//!
//! - `Session`: one room's game, the only entry point the transport calls
//! - `Turn` / `TurnRecord`: the in-progress turn and its sealed history form
//! - `Status` / `PhaseStatus`: per-player "what now?" payloads
//! - `score_turn`: the scoring rule, as a pure function
//!
//! ## Phases
//!
//! `lobby → tell → play → vote → end_turn → tell …`, with
//! `end_turn → end_game` once the pile can no longer deal a full round.

pub mod machine;
pub mod scoring;
pub mod status;
pub mod summary;
pub mod turn;

pub use machine::{Session, SessionStats};
pub use scoring::{score_turn, CONSOLATION_POINTS, DECOY_POINTS, FINDER_POINTS, STORYTELLER_POINTS};
pub use status::{PhaseStatus, Status};
pub use summary::{SummaryLine, TurnSummary};
pub use turn::{Ballot, Points, TableEntry, Turn, TurnRecord};
