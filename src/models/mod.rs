//! Data structures for the cup: entrants, matches, bracket, tournament state.

mod bracket;
mod entrant;
mod game;
mod tournament;

pub use bracket::{Bracket, BracketPhase};
pub use entrant::{promotion_quota, validate_entrants, Entrant, MAX_ENTRANTS, MIN_ENTRANTS};
pub use game::{Match, MatchId, Outcome, PlayoffSlot, Round, Score, MAX_GOALS};
pub use tournament::{ErrorKind, Stage, Tournament, TournamentError, TournamentId};
