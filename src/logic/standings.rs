//! Group table: a pure fold over the played group matches.

use crate::models::{promotion_quota, Entrant, Match, Outcome};
use serde::Serialize;
use std::cmp::Reverse;

pub const POINTS_WIN: u32 = 3;
pub const POINTS_DRAW: u32 = 1;

/// One row of the group table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StandingsRow {
    pub name: String,
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i64,
    pub points: u32,
    /// Inside the promotion quota (would advance if the group ended now).
    pub qualifies: bool,
}

impl StandingsRow {
    fn empty(entrant: &Entrant) -> Self {
        Self {
            name: entrant.name.clone(),
            team: entrant.team.clone(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_diff: 0,
            points: 0,
            qualifies: false,
        }
    }

    fn add(&mut self, goals_for: u32, goals_against: u32) {
        self.played += 1;
        self.goals_for = self.goals_for.saturating_add(goals_for);
        self.goals_against = self.goals_against.saturating_add(goals_against);
        if goals_for > goals_against {
            self.won += 1;
            self.points += POINTS_WIN;
        } else if goals_for == goals_against {
            self.drawn += 1;
            self.points += POINTS_DRAW;
        } else {
            self.lost += 1;
        }
    }
}

/// Rank entrants by (points, goal difference, goals for), all descending.
///
/// Unplayed matches and matches involving an unregistered name are ignored.
/// Ties that survive all three keys keep registry order (the sort is stable).
/// Idempotent and independent of the order `matches` is supplied in.
pub fn compute_standings<'a>(
    entrants: &[Entrant],
    matches: impl IntoIterator<Item = &'a Match>,
) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = entrants.iter().map(StandingsRow::empty).collect();
    let index_of = |name: &str| entrants.iter().position(|e| e.name == name);

    for m in matches {
        let Some(score) = m.score else { continue };
        let (Some(h), Some(a)) = (index_of(&m.home), index_of(&m.away)) else {
            continue;
        };
        rows[h].add(score.home, score.away);
        rows[a].add(score.away, score.home);
    }

    for row in &mut rows {
        row.goal_diff = i64::from(row.goals_for) - i64::from(row.goals_against);
    }
    rows.sort_by_key(|r| (Reverse(r.points), Reverse(r.goal_diff), Reverse(r.goals_for)));

    let quota = promotion_quota(entrants.len());
    for (i, row) in rows.iter_mut().enumerate() {
        row.qualifies = i < quota;
    }
    rows
}

/// Total points a set of played matches hands out: 3 per decisive match, 2 per draw.
pub fn points_awarded<'a>(matches: impl IntoIterator<Item = &'a Match>) -> u32 {
    matches
        .into_iter()
        .filter_map(Match::outcome)
        .map(|o| match o {
            Outcome::Draw => 2 * POINTS_DRAW,
            Outcome::HomeWin | Outcome::AwayWin => POINTS_WIN,
        })
        .sum()
}
