//! Tournament (the owned tournament state), Stage and TournamentError.

use crate::models::bracket::Bracket;
use crate::models::entrant::{promotion_quota, validate_entrants, Entrant, MAX_ENTRANTS, MIN_ENTRANTS};
use crate::models::game::{Match, MatchId, PlayoffSlot, Round, MAX_GOALS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Broad class of a [`TournamentError`]. Every error is recoverable and leaves
/// the tournament unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed input; correct it and retry.
    Validation,
    /// Prerequisite matches are not complete yet.
    NotReady,
    /// Playoff matches recorded in the wrong order.
    Sequence,
    /// Operation invoked in the wrong stage.
    State,
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    #[error("Need between {min} and {max} entrants (got {count})", min = MIN_ENTRANTS, max = MAX_ENTRANTS)]
    WrongEntrantCount { count: usize },
    #[error("Entrant names must not be blank")]
    BlankName,
    #[error("An entrant named {0:?} already exists")]
    DuplicateName(String),
    #[error("Both scores are required")]
    MissingScore,
    #[error("Scores must be whole numbers from 0 to {max} (got {0})", max = MAX_GOALS)]
    InvalidScore(i64),
    #[error("{0} needs a winner; draws are not allowed")]
    DrawNotAllowed(PlayoffSlot),
    #[error("Match not found")]
    MatchNotFound(MatchId),
    #[error("Match already has a result; correct it first")]
    AlreadyRecorded,
    #[error("Match has no result to correct")]
    NotRecorded,
    #[error("Unknown playoff match {0:?}")]
    UnknownSlot(String),
    #[error("{0} is not part of this bracket")]
    SlotNotInBracket(PlayoffSlot),
    #[error("Snapshot is inconsistent: {0}")]
    CorruptSnapshot(String),
    #[error("Group stage not finished ({remaining} match(es) left)")]
    GroupIncomplete { remaining: usize },
    #[error("{0} participants are not known yet; finish both semifinals first")]
    ParticipantsUnset(PlayoffSlot),
    #[error("Playoff is not finished yet")]
    PlayoffIncomplete,
    #[error("Record the third place match before the final")]
    ThirdPlaceFirst,
    #[error("Cannot correct {0}: later playoff matches already have results")]
    LaterMatchRecorded(PlayoffSlot),
    #[error("Not allowed in the {actual:?} stage")]
    InvalidStage { actual: Stage },
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            WrongEntrantCount { .. }
            | BlankName
            | DuplicateName(_)
            | MissingScore
            | InvalidScore(_)
            | DrawNotAllowed(_)
            | MatchNotFound(_)
            | AlreadyRecorded
            | NotRecorded
            | UnknownSlot(_)
            | SlotNotInBracket(_)
            | CorruptSnapshot(_) => ErrorKind::Validation,
            GroupIncomplete { .. } | ParticipantsUnset(_) | PlayoffIncomplete => ErrorKind::NotReady,
            ThirdPlaceFirst | LaterMatchRecorded(_) => ErrorKind::Sequence,
            InvalidStage { .. } => ErrorKind::State,
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Collecting entrants; nothing scheduled.
    #[default]
    Registration,
    /// Round robin in progress.
    Group,
    /// Knockout (or direct final); group results are frozen.
    Playoff,
}

/// Full tournament state: registry, group schedule, seeds, bracket and stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub stage: Stage,
    /// Registered entrants in registration order (the standings tie-break order).
    pub entrants: Vec<Entrant>,
    /// Seed the group schedule was shuffled with.
    pub schedule_seed: Option<u64>,
    pub group_matches: Vec<Match>,
    /// Top of the group standings at the moment the playoff started.
    pub seeds: Vec<String>,
    /// Whole group standings order at the moment the playoff started.
    pub group_ranking: Vec<String>,
    /// Present only in the Playoff stage.
    pub bracket: Option<Bracket>,
    pub created_at: DateTime<Utc>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    /// Create an empty tournament in the Registration stage.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            stage: Stage::Registration,
            entrants: Vec::new(),
            schedule_seed: None,
            group_matches: Vec::new(),
            seeds: Vec::new(),
            group_ranking: Vec::new(),
            bracket: None,
            created_at: Utc::now(),
        }
    }

    /// Discard everything and go back to Registration. The id is kept so
    /// callers holding it keep addressing the same tournament.
    pub fn reset(&mut self) {
        let id = self.id;
        *self = Self::new();
        self.id = id;
        log::info!("Tournament {} reset", id);
    }

    /// Fail with `InvalidStage` unless the tournament is in `stage`.
    pub fn require_stage(&self, stage: Stage) -> Result<(), TournamentError> {
        if self.stage != stage {
            return Err(TournamentError::InvalidStage { actual: self.stage });
        }
        Ok(())
    }

    pub fn entrant(&self, name: &str) -> Option<&Entrant> {
        self.entrants.iter().find(|e| e.name == name)
    }

    pub fn group_match(&self, id: MatchId) -> Option<&Match> {
        self.group_matches.iter().find(|m| m.id == id)
    }

    pub(crate) fn group_match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.group_matches.iter_mut().find(|m| m.id == id)
    }

    /// Number of entrants promoted to the playoff for the current field.
    pub fn promotion_quota(&self) -> usize {
        promotion_quota(self.entrants.len())
    }

    /// Group matches followed by whichever playoff matches exist.
    pub fn all_matches(&self) -> impl Iterator<Item = &Match> {
        self.group_matches
            .iter()
            .chain(self.bracket.iter().flat_map(|b| b.matches()))
    }

    /// Check that a deserialized snapshot can be resumed: the registry passes the
    /// registration rules, the schedule is a full round robin, and playoff data
    /// matches what advancing and recording would have produced.
    pub fn check_snapshot(&self) -> Result<(), TournamentError> {
        let corrupt = |msg: &str| Err(TournamentError::CorruptSnapshot(msg.to_string()));
        let n = self.entrants.len();

        if self.stage == Stage::Registration {
            if n != 0
                || !self.group_matches.is_empty()
                || !self.seeds.is_empty()
                || !self.group_ranking.is_empty()
                || self.bracket.is_some()
            {
                return corrupt("registration stage must be empty");
            }
            return Ok(());
        }
        if let Err(e) = validate_entrants(&self.entrants) {
            return corrupt(&e.to_string());
        }

        let registered = |name: &str| self.entrant(name).is_some();
        if self
            .group_matches
            .iter()
            .any(|m| !registered(&m.home) || !registered(&m.away) || m.home == m.away)
        {
            return corrupt("group match references an unknown entrant");
        }
        if self.group_matches.iter().any(|m| m.round != Round::Group) {
            return corrupt("group schedule holds a knockout match");
        }
        let pairings: HashSet<(&str, &str)> = self
            .group_matches
            .iter()
            .map(|m| {
                let (a, b) = (m.home.as_str(), m.away.as_str());
                if a < b {
                    (a, b)
                } else {
                    (b, a)
                }
            })
            .collect();
        if self.group_matches.len() != n * (n - 1) / 2 || pairings.len() != self.group_matches.len() {
            return corrupt("group schedule is not a full round robin");
        }
        if self.all_matches().any(|m| m.score.is_some_and(|s| s.checked().is_err())) {
            return corrupt("score above the goal limit");
        }

        match self.stage {
            Stage::Registration | Stage::Group => {
                if self.bracket.is_some() || !self.seeds.is_empty() || !self.group_ranking.is_empty() {
                    return corrupt("group stage cannot carry playoff data");
                }
            }
            Stage::Playoff => {
                let Some(bracket) = &self.bracket else {
                    return corrupt("playoff stage without bracket");
                };
                if self.group_matches.iter().any(|m| !m.is_played()) {
                    return corrupt("playoff started with unplayed group matches");
                }
                if self.seeds.len() != self.promotion_quota() || bracket.seed_count() != self.seeds.len() {
                    return corrupt("seed count does not match field size");
                }
                let distinct: HashSet<&str> = self.group_ranking.iter().map(String::as_str).collect();
                if self.group_ranking.len() != n
                    || distinct.len() != n
                    || self.group_ranking.iter().any(|name| !registered(name))
                    || !self.group_ranking.starts_with(&self.seeds)
                {
                    return corrupt("group ranking snapshot does not match entrants");
                }
                if let Some(problem) = bracket.inconsistency(&self.seeds) {
                    return corrupt(problem);
                }
            }
        }
        Ok(())
    }
}
