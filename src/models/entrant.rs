//! Entrant data structure.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Smallest field a tournament can run with (direct final).
pub const MIN_ENTRANTS: usize = 3;
/// Largest field supported by the group stage.
pub const MAX_ENTRANTS: usize = 6;

/// A participant: unique display name plus the team they play with.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub name: String,
    pub team: String,
}

impl Entrant {
    /// Create an entrant. Name and team are trimmed; validation happens at registration.
    pub fn new(name: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            team: team.into().trim().to_string(),
        }
    }

    /// ASCII case-insensitive name comparison (names are unique under this rule).
    /// Non-ASCII letters compare exactly, so `Ärne` and `ärne` are different names.
    pub fn same_name(&self, other: &str) -> bool {
        self.name.eq_ignore_ascii_case(other.trim())
    }
}

/// Check a field of entrants without touching any tournament.
/// Names must be non-blank and unique (ASCII case-insensitive); 3 to 6 entrants.
pub fn validate_entrants(entrants: &[Entrant]) -> Result<(), TournamentError> {
    if entrants.iter().any(|e| e.name.trim().is_empty()) {
        return Err(TournamentError::BlankName);
    }
    for (i, entrant) in entrants.iter().enumerate() {
        if entrants[..i].iter().any(|earlier| earlier.same_name(&entrant.name)) {
            return Err(TournamentError::DuplicateName(entrant.name.clone()));
        }
    }
    if !(MIN_ENTRANTS..=MAX_ENTRANTS).contains(&entrants.len()) {
        return Err(TournamentError::WrongEntrantCount {
            count: entrants.len(),
        });
    }
    Ok(())
}

/// How many entrants advance from the group to the playoff: 2 for a three-entrant
/// field (direct final), 4 otherwise (semifinals).
pub fn promotion_quota(entrant_count: usize) -> usize {
    if entrant_count <= MIN_ENTRANTS {
        2
    } else {
        4
    }
}
