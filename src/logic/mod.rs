//! Tournament business logic: registration, group play, playoff, final ranking.

mod export;
mod final_ranking;
mod group_play;
mod playoff;
mod schedule;
mod setup;
mod standings;

pub use export::{final_stats_csv, standings_csv};
pub use final_ranking::{aggregate_final_stats, final_placements, final_stats, FinalStatsRow, Placement};
pub use group_play::{
    advance_to_playoff, correct_group_match, group_progress, record_group_match, standings,
    GroupProgress,
};
pub use playoff::{bracket_view, correct_playoff_match, record_playoff_match, BracketView, SlotView};
pub use schedule::generate_schedule;
pub use setup::{register_entrants, register_entrants_seeded};
pub use standings::{compute_standings, points_awarded, StandingsRow, POINTS_DRAW, POINTS_WIN};
