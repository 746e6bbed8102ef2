//! Head-to-head cup organizer: library with models, business logic and the HTTP API.
//!
//! A 3–6 entrant round robin decides the seeds for either a direct final (3 entrants)
//! or semifinals, third place match and final (4+ entrants). All state lives in an
//! owned [`Tournament`]; the functions in [`logic`] move it through its stages.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;

pub use config::ServerConfig;
pub use logic::{
    advance_to_playoff, aggregate_final_stats, bracket_view, compute_standings,
    correct_group_match, correct_playoff_match, final_placements, final_stats, final_stats_csv,
    generate_schedule, group_progress, points_awarded, record_group_match, record_playoff_match,
    register_entrants, register_entrants_seeded, standings, standings_csv,
    BracketView, FinalStatsRow, GroupProgress, Placement, SlotView, StandingsRow,
};
pub use models::{
    promotion_quota, validate_entrants, Bracket, BracketPhase, Entrant, ErrorKind, Match, MatchId, Outcome,
    PlayoffSlot, Round, Score, Stage, Tournament, TournamentError, TournamentId, MAX_GOALS,
};
