//! Integration tests for registration and schedule generation.

mod common;

use common::{field, snapshot};
use cup_tournament_web::{
    generate_schedule, register_entrants, register_entrants_seeded, Entrant, ErrorKind, Stage,
    Tournament, TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

#[test]
fn duplicate_names_are_rejected_and_stage_stays_registration() {
    let mut t = Tournament::new();
    let before = snapshot(&t);
    let err = register_entrants(&mut t, field(&["X", "X"])).unwrap_err();
    assert_eq!(err, TournamentError::DuplicateName("X".into()));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(t.stage, Stage::Registration);
    assert_eq!(snapshot(&t), before);
}

#[test]
fn duplicate_check_ignores_case_and_padding() {
    let mut t = Tournament::new();
    let err = register_entrants(&mut t, field(&["Ann", "Bo", " ann "])).unwrap_err();
    assert!(matches!(err, TournamentError::DuplicateName(_)));
}

#[test]
fn blank_names_are_rejected() {
    let mut t = Tournament::new();
    let err = register_entrants(&mut t, field(&["Ann", "  ", "Cy"])).unwrap_err();
    assert_eq!(err, TournamentError::BlankName);
    assert_eq!(t.stage, Stage::Registration);
}

#[test]
fn entrant_count_must_be_three_to_six() {
    for names in [&["A", "B"][..], &["A", "B", "C", "D", "E", "F", "G"][..]] {
        let mut t = Tournament::new();
        let err = register_entrants(&mut t, field(names)).unwrap_err();
        assert_eq!(err, TournamentError::WrongEntrantCount { count: names.len() });
        assert_eq!(t.stage, Stage::Registration);
        assert!(t.group_matches.is_empty());
    }
}

#[test]
fn registration_starts_group_stage() {
    let mut t = Tournament::new();
    register_entrants(&mut t, vec![Entrant::new(" Ann ", " Real "), Entrant::new("Bo", ""), Entrant::new("Cy", "Inter")])
        .unwrap();
    assert_eq!(t.stage, Stage::Group);
    assert_eq!(t.entrants[0], Entrant::new("Ann", "Real"));
    assert_eq!(t.group_matches.len(), 3);
    assert!(t.schedule_seed.is_some());
}

#[test]
fn cannot_register_twice() {
    let mut t = common::group_stage(&["A", "B", "C"]);
    let err = register_entrants(&mut t, field(&["D", "E", "F"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);
    assert_eq!(t.entrants.len(), 3);
}

#[test]
fn schedule_is_full_round_robin_for_every_field_size() {
    let names = ["A", "B", "C", "D", "E", "F"];
    for n in 3..=6 {
        let entrants = field(&names[..n]);
        let schedule = generate_schedule(&entrants, &mut StdRng::seed_from_u64(n as u64));
        assert_eq!(schedule.len(), n * (n - 1) / 2);

        let pairs: HashSet<(String, String)> = schedule
            .iter()
            .map(|m| {
                assert_ne!(m.home, m.away, "self pairing");
                if m.home < m.away {
                    (m.home.clone(), m.away.clone())
                } else {
                    (m.away.clone(), m.home.clone())
                }
            })
            .collect();
        assert_eq!(pairs.len(), schedule.len(), "duplicate pairing");
    }
}

#[test]
fn seeded_registration_is_reproducible() {
    let order = |t: &Tournament| {
        t.group_matches
            .iter()
            .map(|m| format!("{}-{}", m.home, m.away))
            .collect::<Vec<_>>()
    };
    let mut a = Tournament::new();
    let mut b = Tournament::new();
    register_entrants_seeded(&mut a, field(&["A", "B", "C", "D", "E"]), 9).unwrap();
    register_entrants_seeded(&mut b, field(&["A", "B", "C", "D", "E"]), 9).unwrap();
    assert_eq!(order(&a), order(&b));
    assert_eq!(a.schedule_seed, Some(9));
}
