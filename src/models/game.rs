//! Match, Score, Round and PlayoffSlot for head-to-head games.

use crate::models::tournament::TournamentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Phase of the tournament this match belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    Group,
    Semifinal,
    ThirdPlace,
    Final,
}

impl Round {
    /// Knockout rounds need a decisive result; only the group allows draws.
    pub fn allows_draw(self) -> bool {
        self == Round::Group
    }
}

/// Key of a match inside the playoff bracket.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum PlayoffSlot {
    #[serde(rename = "SF1")]
    Semifinal1,
    #[serde(rename = "SF2")]
    Semifinal2,
    #[serde(rename = "3RD")]
    ThirdPlace,
    #[serde(rename = "FINAL")]
    Final,
}

impl PlayoffSlot {
    pub fn key(self) -> &'static str {
        match self {
            PlayoffSlot::Semifinal1 => "SF1",
            PlayoffSlot::Semifinal2 => "SF2",
            PlayoffSlot::ThirdPlace => "3RD",
            PlayoffSlot::Final => "FINAL",
        }
    }

    pub fn round(self) -> Round {
        match self {
            PlayoffSlot::Semifinal1 | PlayoffSlot::Semifinal2 => Round::Semifinal,
            PlayoffSlot::ThirdPlace => Round::ThirdPlace,
            PlayoffSlot::Final => Round::Final,
        }
    }
}

impl fmt::Display for PlayoffSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PlayoffSlot {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SF1" => Ok(PlayoffSlot::Semifinal1),
            "SF2" => Ok(PlayoffSlot::Semifinal2),
            "3RD" | "THIRD" => Ok(PlayoffSlot::ThirdPlace),
            "FINAL" => Ok(PlayoffSlot::Final),
            _ => Err(TournamentError::UnknownSlot(s.to_string())),
        }
    }
}

/// Highest goal count accepted for one side of a match.
pub const MAX_GOALS: u32 = 999;

/// Goals scored by the home and away side.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Build a score from unchecked input (e.g. a form or JSON body).
    /// Both values must be present and within `0..=MAX_GOALS`.
    pub fn from_raw(home: Option<i64>, away: Option<i64>) -> Result<Self, TournamentError> {
        let home = home.ok_or(TournamentError::MissingScore)?;
        let away = away.ok_or(TournamentError::MissingScore)?;
        let convert = |v: i64| {
            u32::try_from(v)
                .ok()
                .filter(|&goals| goals <= MAX_GOALS)
                .ok_or(TournamentError::InvalidScore(v))
        };
        Ok(Self::new(convert(home)?, convert(away)?))
    }

    /// Reject goal counts above `MAX_GOALS`.
    pub fn checked(self) -> Result<Self, TournamentError> {
        match [self.home, self.away].into_iter().find(|&goals| goals > MAX_GOALS) {
            Some(goals) => Err(TournamentError::InvalidScore(i64::from(goals))),
            None => Ok(self),
        }
    }

    pub fn is_draw(&self) -> bool {
        self.home == self.away
    }
}

/// Result of a played match from the home side's perspective.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

/// A single head-to-head match between two registered entrants (by name).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home: String,
    pub away: String,
    /// None if not yet played.
    pub score: Option<Score>,
    pub round: Round,
    /// When the current score was recorded.
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Match {
    pub fn new(home: impl Into<String>, away: impl Into<String>, round: Round) -> Self {
        Self {
            id: Uuid::new_v4(),
            home: home.into(),
            away: away.into(),
            score: None,
            round,
            recorded_at: None,
        }
    }

    pub fn is_played(&self) -> bool {
        self.score.is_some()
    }

    /// True if this match is the pairing {a, b} in either orientation.
    pub fn pairs(&self, a: &str, b: &str) -> bool {
        (self.home == a && self.away == b) || (self.home == b && self.away == a)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        let s = self.score?;
        Some(if s.home > s.away {
            Outcome::HomeWin
        } else if s.away > s.home {
            Outcome::AwayWin
        } else {
            Outcome::Draw
        })
    }

    /// Winner by strict score comparison; None if unplayed or drawn.
    pub fn winner(&self) -> Option<&str> {
        match self.outcome()? {
            Outcome::HomeWin => Some(self.home.as_str()),
            Outcome::AwayWin => Some(self.away.as_str()),
            Outcome::Draw => None,
        }
    }

    /// Loser by strict score comparison; None if unplayed or drawn.
    pub fn loser(&self) -> Option<&str> {
        match self.outcome()? {
            Outcome::HomeWin => Some(self.away.as_str()),
            Outcome::AwayWin => Some(self.home.as_str()),
            Outcome::Draw => None,
        }
    }

    /// (goals for, goals against) for `name`, if they took part and the match is played.
    pub fn goals_of(&self, name: &str) -> Option<(u32, u32)> {
        let s = self.score?;
        if self.home == name {
            Some((s.home, s.away))
        } else if self.away == name {
            Some((s.away, s.home))
        } else {
            None
        }
    }

    /// Store a score. Callers check `is_played` and draw rules first.
    pub(crate) fn record(&mut self, score: Score) {
        self.score = Some(score);
        self.recorded_at = Some(Utc::now());
    }

    /// Back to unplayed.
    pub(crate) fn clear(&mut self) {
        self.score = None;
        self.recorded_at = None;
    }
}
