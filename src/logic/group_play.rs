//! Group stage: recording and correcting results, the live table, and the move to the playoff.

use crate::logic::standings::{compute_standings, StandingsRow};
use crate::models::{Bracket, MatchId, Score, Stage, Tournament, TournamentError};
use serde::Serialize;

/// How far the round robin has got.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct GroupProgress {
    pub played: usize,
    pub total: usize,
    pub remaining: usize,
}

/// Record a group result. The match must be unplayed; draws are legal here.
pub fn record_group_match(
    tournament: &mut Tournament,
    match_id: MatchId,
    score: Score,
) -> Result<(), TournamentError> {
    tournament.require_stage(Stage::Group)?;
    let score = score.checked()?;
    let m = tournament
        .group_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.is_played() {
        return Err(TournamentError::AlreadyRecorded);
    }
    m.record(score);
    log::debug!("Group: {} {}:{} {}", m.home, score.home, score.away, m.away);
    Ok(())
}

/// Reset a played group match to unplayed. Only while the group is running:
/// once the playoff starts, group results are locked.
pub fn correct_group_match(tournament: &mut Tournament, match_id: MatchId) -> Result<(), TournamentError> {
    tournament.require_stage(Stage::Group)?;
    let m = tournament
        .group_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if !m.is_played() {
        return Err(TournamentError::NotRecorded);
    }
    m.clear();
    log::debug!("Group: {} vs {} reset to unplayed", m.home, m.away);
    Ok(())
}

/// Current group table (available during the group and, frozen, during the playoff).
pub fn standings(tournament: &Tournament) -> Result<Vec<StandingsRow>, TournamentError> {
    if tournament.stage == Stage::Registration {
        return Err(TournamentError::InvalidStage {
            actual: tournament.stage,
        });
    }
    Ok(compute_standings(&tournament.entrants, &tournament.group_matches))
}

pub fn group_progress(tournament: &Tournament) -> GroupProgress {
    let total = tournament.group_matches.len();
    let played = tournament.group_matches.iter().filter(|m| m.is_played()).count();
    GroupProgress {
        played,
        total,
        remaining: total - played,
    }
}

/// Close the group: capture seeds and the group order, build the bracket, move Group -> Playoff.
///
/// Three entrants get a direct final (seeds 1 and 2); four or more get semifinals
/// 1v4 and 2v3.
pub fn advance_to_playoff(tournament: &mut Tournament) -> Result<(), TournamentError> {
    tournament.require_stage(Stage::Group)?;
    let progress = group_progress(tournament);
    if progress.remaining > 0 {
        return Err(TournamentError::GroupIncomplete {
            remaining: progress.remaining,
        });
    }

    let group_ranking: Vec<String> = compute_standings(&tournament.entrants, &tournament.group_matches)
        .into_iter()
        .map(|row| row.name)
        .collect();
    let seeds: Vec<String> = group_ranking
        .iter()
        .take(tournament.promotion_quota())
        .cloned()
        .collect();
    let bracket = Bracket::from_seeds(&seeds).ok_or(TournamentError::WrongEntrantCount {
        count: tournament.entrants.len(),
    })?;

    log::info!("Tournament {}: playoff seeds {:?}", tournament.id, seeds);
    tournament.seeds = seeds;
    tournament.group_ranking = group_ranking;
    tournament.bracket = Some(bracket);
    tournament.stage = Stage::Playoff;
    Ok(())
}
