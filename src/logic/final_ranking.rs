//! Final ranking: playoff placements on top, the rest in group order, with
//! statistics summed over every match (group and playoff).

use crate::models::{Bracket, Entrant, Match, PlayoffSlot, Stage, Tournament, TournamentError};
use serde::Serialize;

/// A place in the final ranking. `Unresolved` stands in for a placement whose
/// deciding match has no result yet.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Entrant(String),
    Unresolved,
}

impl Placement {
    pub fn name(&self) -> Option<&str> {
        match self {
            Placement::Entrant(name) => Some(name.as_str()),
            Placement::Unresolved => None,
        }
    }
}

/// One row of the final table. Playoff matches carry no points, so the table
/// counts results and goals only.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FinalStatsRow {
    pub rank: usize,
    pub name: Option<String>,
    pub team: Option<String>,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i64,
}

fn decided(m: Option<&Match>) -> [Placement; 2] {
    match m.and_then(|m| m.winner().zip(m.loser())) {
        Some((winner, loser)) => [
            Placement::Entrant(winner.to_string()),
            Placement::Entrant(loser.to_string()),
        ],
        None => [Placement::Unresolved, Placement::Unresolved],
    }
}

/// Placements 1..N.
///
/// Direct final: final winner, final loser, then the group order beyond the two finalists.
/// Seeded: final winner, final loser, third place winner, third place loser, then the
/// group order beyond the four semifinalists.
pub fn final_placements(bracket: &Bracket, group_ranking: &[String]) -> Vec<Placement> {
    let mut placements: Vec<Placement> = decided(bracket.get(PlayoffSlot::Final)).into();
    if let Bracket::Seeded { .. } = bracket {
        placements.extend(decided(bracket.get(PlayoffSlot::ThirdPlace)));
    }
    placements.extend(
        group_ranking
            .iter()
            .skip(bracket.seed_count())
            .cloned()
            .map(Placement::Entrant),
    );
    placements
}

/// Build the final table row by row, in placement order. Each entrant's totals
/// cover every played match they took part in.
pub fn aggregate_final_stats<'a>(
    placements: &[Placement],
    entrants: &[Entrant],
    matches: impl IntoIterator<Item = &'a Match> + Clone,
) -> Vec<FinalStatsRow> {
    placements
        .iter()
        .enumerate()
        .map(|(i, placement)| {
            let mut row = FinalStatsRow {
                rank: i + 1,
                name: placement.name().map(str::to_string),
                team: None,
                played: 0,
                won: 0,
                drawn: 0,
                lost: 0,
                goals_for: 0,
                goals_against: 0,
                goal_diff: 0,
            };
            let Some(name) = placement.name() else {
                return row;
            };
            row.team = entrants.iter().find(|e| e.name == name).map(|e| e.team.clone());
            for (gf, ga) in matches.clone().into_iter().filter_map(|m| m.goals_of(name)) {
                row.played += 1;
                row.goals_for = row.goals_for.saturating_add(gf);
                row.goals_against = row.goals_against.saturating_add(ga);
                if gf > ga {
                    row.won += 1;
                } else if gf == ga {
                    row.drawn += 1;
                } else {
                    row.lost += 1;
                }
            }
            row.goal_diff = i64::from(row.goals_for) - i64::from(row.goals_against);
            row
        })
        .collect()
}

/// Final table for a finished playoff.
pub fn final_stats(tournament: &Tournament) -> Result<Vec<FinalStatsRow>, TournamentError> {
    tournament.require_stage(Stage::Playoff)?;
    let bracket = tournament
        .bracket
        .as_ref()
        .filter(|b| b.is_complete())
        .ok_or(TournamentError::PlayoffIncomplete)?;
    let placements = final_placements(bracket, &tournament.group_ranking);
    let matches: Vec<&Match> = tournament.all_matches().collect();
    Ok(aggregate_final_stats(
        &placements,
        &tournament.entrants,
        matches.iter().copied(),
    ))
}
