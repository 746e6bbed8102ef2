//! Playoff bracket shapes.

use crate::models::game::{Match, PlayoffSlot, Round};
use serde::{Deserialize, Serialize};

/// Where the playoff currently stands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketPhase {
    /// Three-entrant field: waiting for the direct final.
    FinalPending,
    /// Four seeds: at least one semifinal unplayed.
    SemisPending,
    /// Third place and final drawn; at least one unplayed.
    ThirdAndFinalPending,
    /// Final played.
    Complete,
}

/// Knockout stage. Shape is chosen once from the entrant count when the playoff starts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Bracket {
    /// Three entrants: seed 1 vs seed 2.
    DirectFinal { final_match: Match },
    /// Four seeds: 1v4 and 2v3, then third place and final.
    /// `third_place` and `final_match` are None until both semifinals are played.
    Seeded {
        semifinal_1: Match,
        semifinal_2: Match,
        third_place: Option<Match>,
        final_match: Option<Match>,
    },
}

impl Bracket {
    /// Build the bracket for the given seeds (2 seeds: direct final, 4 seeds: semifinals).
    /// Returns None for any other seed count.
    pub fn from_seeds(seeds: &[String]) -> Option<Self> {
        match seeds {
            [first, second] => Some(Bracket::DirectFinal {
                final_match: Match::new(first.as_str(), second.as_str(), Round::Final),
            }),
            [s1, s2, s3, s4] => Some(Bracket::Seeded {
                semifinal_1: Match::new(s1.as_str(), s4.as_str(), Round::Semifinal),
                semifinal_2: Match::new(s2.as_str(), s3.as_str(), Round::Semifinal),
                third_place: None,
                final_match: None,
            }),
            _ => None,
        }
    }

    /// Number of seeds this shape holds.
    pub fn seed_count(&self) -> usize {
        match self {
            Bracket::DirectFinal { .. } => 2,
            Bracket::Seeded { .. } => 4,
        }
    }

    /// Slots that exist in this shape, in display order.
    pub fn slots(&self) -> &'static [PlayoffSlot] {
        match self {
            Bracket::DirectFinal { .. } => &[PlayoffSlot::Final],
            Bracket::Seeded { .. } => &[
                PlayoffSlot::Semifinal1,
                PlayoffSlot::Semifinal2,
                PlayoffSlot::ThirdPlace,
                PlayoffSlot::Final,
            ],
        }
    }

    /// Whether `slot` is part of this shape at all.
    pub fn has_slot(&self, slot: PlayoffSlot) -> bool {
        self.slots().contains(&slot)
    }

    /// Match at `slot`. None if the slot is not part of this shape or its
    /// participants are not known yet.
    pub fn get(&self, slot: PlayoffSlot) -> Option<&Match> {
        match (self, slot) {
            (Bracket::DirectFinal { final_match }, PlayoffSlot::Final) => Some(final_match),
            (Bracket::DirectFinal { .. }, _) => None,
            (Bracket::Seeded { semifinal_1, .. }, PlayoffSlot::Semifinal1) => Some(semifinal_1),
            (Bracket::Seeded { semifinal_2, .. }, PlayoffSlot::Semifinal2) => Some(semifinal_2),
            (Bracket::Seeded { third_place, .. }, PlayoffSlot::ThirdPlace) => third_place.as_ref(),
            (Bracket::Seeded { final_match, .. }, PlayoffSlot::Final) => final_match.as_ref(),
        }
    }

    pub(crate) fn get_mut(&mut self, slot: PlayoffSlot) -> Option<&mut Match> {
        match (self, slot) {
            (Bracket::DirectFinal { final_match }, PlayoffSlot::Final) => Some(final_match),
            (Bracket::DirectFinal { .. }, _) => None,
            (Bracket::Seeded { semifinal_1, .. }, PlayoffSlot::Semifinal1) => Some(semifinal_1),
            (Bracket::Seeded { semifinal_2, .. }, PlayoffSlot::Semifinal2) => Some(semifinal_2),
            (Bracket::Seeded { third_place, .. }, PlayoffSlot::ThirdPlace) => third_place.as_mut(),
            (Bracket::Seeded { final_match, .. }, PlayoffSlot::Final) => final_match.as_mut(),
        }
    }

    /// The final, once its participants are known.
    pub fn final_match(&self) -> Option<&Match> {
        self.get(PlayoffSlot::Final)
    }

    /// All matches with known participants (played or not).
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.slots().iter().filter_map(move |&slot| self.get(slot))
    }

    pub fn phase(&self) -> BracketPhase {
        match self {
            Bracket::DirectFinal { final_match } => {
                if final_match.is_played() {
                    BracketPhase::Complete
                } else {
                    BracketPhase::FinalPending
                }
            }
            // Third place and final are drawn by the same call that records the
            // second semifinal, so no final means a semifinal is still open.
            Bracket::Seeded { final_match, .. } => match final_match {
                None => BracketPhase::SemisPending,
                Some(f) if f.is_played() => BracketPhase::Complete,
                Some(_) => BracketPhase::ThirdAndFinalPending,
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == BracketPhase::Complete
    }

    /// First structural problem with this bracket for the given seeds, if any.
    /// Used when resuming a snapshot.
    pub(crate) fn inconsistency(&self, seeds: &[String]) -> Option<&'static str> {
        fn is(m: &Match, home: &str, away: &str, round: Round) -> bool {
            m.home == home && m.away == away && m.round == round
        }
        if self.matches().any(|m| m.score.is_some_and(|s| s.is_draw())) {
            return Some("knockout match with a drawn score");
        }
        match (self, seeds) {
            (Bracket::DirectFinal { final_match }, [s1, s2]) => {
                if !is(final_match, s1, s2, Round::Final) {
                    return Some("final is not seed 1 vs seed 2");
                }
            }
            (
                Bracket::Seeded {
                    semifinal_1,
                    semifinal_2,
                    third_place,
                    final_match,
                },
                [s1, s2, s3, s4],
            ) => {
                if !is(semifinal_1, s1, s4, Round::Semifinal) || !is(semifinal_2, s2, s3, Round::Semifinal) {
                    return Some("semifinals are not seed 1 vs 4 and seed 2 vs 3");
                }
                let decided = (
                    semifinal_1.winner().zip(semifinal_1.loser()),
                    semifinal_2.winner().zip(semifinal_2.loser()),
                );
                match (decided, third_place, final_match) {
                    ((Some((w1, l1)), Some((w2, l2))), Some(third), Some(fin)) => {
                        if !is(third, l1, l2, Round::ThirdPlace) || !is(fin, w1, w2, Round::Final) {
                            return Some("third place or final does not follow the semifinals");
                        }
                        if fin.is_played() && !third.is_played() {
                            return Some("final played before third place");
                        }
                    }
                    ((Some(_), Some(_)), _, _) => {
                        return Some("semifinals played but third place or final missing");
                    }
                    (_, None, None) => {}
                    _ => return Some("third place or final set before both semifinals are played"),
                }
            }
            _ => return Some("bracket shape does not match seed count"),
        }
        None
    }
}
