//! Helpers shared by the integration tests.
#![allow(dead_code)]

use cup_tournament_web::{
    register_entrants_seeded, record_group_match, Entrant, MatchId, Score, Tournament,
};

pub const SEED: u64 = 42;

pub fn field(names: &[&str]) -> Vec<Entrant> {
    names.iter().map(|n| Entrant::new(*n, format!("{n} FC"))).collect()
}

/// A tournament in the Group stage with the given entrants (fixed schedule seed).
pub fn group_stage(names: &[&str]) -> Tournament {
    let mut t = Tournament::new();
    register_entrants_seeded(&mut t, field(names), SEED).unwrap();
    t
}

/// Id of the group match between `a` and `b` (either orientation).
pub fn match_between(t: &Tournament, a: &str, b: &str) -> MatchId {
    t.group_matches
        .iter()
        .find(|m| m.pairs(a, b))
        .unwrap_or_else(|| panic!("no match {a} vs {b}"))
        .id
}

/// Record "`a` `goals_a` : `goals_b` `b`" regardless of which side is home.
pub fn play(t: &mut Tournament, a: &str, goals_a: u32, b: &str, goals_b: u32) {
    let id = match_between(t, a, b);
    let score = if t.group_match(id).unwrap().home == a {
        Score::new(goals_a, goals_b)
    } else {
        Score::new(goals_b, goals_a)
    };
    record_group_match(t, id, score).unwrap();
}

/// Play the whole group so that the standings follow registry order:
/// the entrant registered earlier always wins 1-0.
pub fn play_group_in_registry_order(t: &mut Tournament) {
    let names: Vec<String> = t.entrants.iter().map(|e| e.name.clone()).collect();
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            play(t, a, 1, b, 0);
        }
    }
}

/// Serialized form, for checking an operation left the tournament untouched.
pub fn snapshot(t: &Tournament) -> serde_json::Value {
    serde_json::to_value(t).unwrap()
}
