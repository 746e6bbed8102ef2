//! Integration tests for the playoff bracket: seeding, sequencing, draws and corrections.

mod common;

use common::{group_stage, play, play_group_in_registry_order, snapshot};
use cup_tournament_web::{
    advance_to_playoff, bracket_view, correct_playoff_match, record_playoff_match, Bracket,
    BracketPhase, ErrorKind, PlayoffSlot, Score, Tournament, TournamentError, MAX_GOALS,
};

/// Playoff with seeds in registry order.
fn playoff(names: &[&str]) -> Tournament {
    let mut t = group_stage(names);
    play_group_in_registry_order(&mut t);
    advance_to_playoff(&mut t).unwrap();
    t
}

fn pairing(t: &Tournament, slot: PlayoffSlot) -> Option<(String, String)> {
    let m = t.bracket.as_ref()?.get(slot)?;
    Some((m.home.clone(), m.away.clone()))
}

fn pair(a: &str, b: &str) -> Option<(String, String)> {
    Some((a.to_string(), b.to_string()))
}

#[test]
fn four_seeds_cross_seed_semifinals() {
    let t = playoff(&["A", "B", "C", "D"]);
    assert_eq!(pairing(&t, PlayoffSlot::Semifinal1), pair("A", "D"));
    assert_eq!(pairing(&t, PlayoffSlot::Semifinal2), pair("B", "C"));
    assert_eq!(pairing(&t, PlayoffSlot::ThirdPlace), None);
    assert_eq!(pairing(&t, PlayoffSlot::Final), None);
    assert_eq!(t.bracket.as_ref().unwrap().phase(), BracketPhase::SemisPending);
}

#[test]
fn bracket_from_seeds_pairs_one_four_and_two_three() {
    let seeds: Vec<String> = ["W", "X", "Y", "Z"].iter().map(|s| s.to_string()).collect();
    let bracket = Bracket::from_seeds(&seeds).unwrap();
    let sf1 = bracket.get(PlayoffSlot::Semifinal1).unwrap();
    let sf2 = bracket.get(PlayoffSlot::Semifinal2).unwrap();
    assert!(sf1.pairs("W", "Z"));
    assert!(sf2.pairs("X", "Y"));
    assert!(Bracket::from_seeds(&seeds[..3]).is_none());
}

#[test]
fn six_entrants_seed_only_the_top_four() {
    let t = playoff(&["A", "B", "C", "D", "E", "F"]);
    assert_eq!(t.seeds, ["A", "B", "C", "D"]);
    assert_eq!(pairing(&t, PlayoffSlot::Semifinal1), pair("A", "D"));
}

#[test]
fn four_entrant_scenario() {
    let mut t = playoff(&["A", "B", "C", "D"]);
    record_playoff_match(&mut t, PlayoffSlot::Semifinal1, Score::new(2, 1)).unwrap();
    assert_eq!(t.bracket.as_ref().unwrap().phase(), BracketPhase::SemisPending);
    record_playoff_match(&mut t, PlayoffSlot::Semifinal2, Score::new(0, 3)).unwrap();

    assert_eq!(pairing(&t, PlayoffSlot::ThirdPlace), pair("D", "B"));
    assert_eq!(pairing(&t, PlayoffSlot::Final), pair("A", "C"));
    assert_eq!(t.bracket.as_ref().unwrap().phase(), BracketPhase::ThirdAndFinalPending);

    let before = snapshot(&t);
    let err = record_playoff_match(&mut t, PlayoffSlot::Final, Score::new(1, 0)).unwrap_err();
    assert_eq!(err, TournamentError::ThirdPlaceFirst);
    assert_eq!(err.kind(), ErrorKind::Sequence);
    assert_eq!(snapshot(&t), before);
    assert!(!t.bracket.as_ref().unwrap().final_match().unwrap().is_played());

    record_playoff_match(&mut t, PlayoffSlot::ThirdPlace, Score::new(2, 0)).unwrap();
    record_playoff_match(&mut t, PlayoffSlot::Final, Score::new(1, 0)).unwrap();
    assert!(t.bracket.as_ref().unwrap().is_complete());

    let view = bracket_view(&t).unwrap();
    assert_eq!(view.phase, BracketPhase::Complete);
    assert_eq!(view.champion.as_deref(), Some("A"));
    assert!(view.slots.iter().all(|s| !s.recordable));
}

#[test]
fn draws_are_rejected_in_knockout_matches() {
    let mut t = playoff(&["A", "B", "C", "D"]);
    let before = snapshot(&t);
    let err = record_playoff_match(&mut t, PlayoffSlot::Semifinal1, Score::new(1, 1)).unwrap_err();
    assert_eq!(err, TournamentError::DrawNotAllowed(PlayoffSlot::Semifinal1));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(snapshot(&t), before);
}

#[test]
fn oversized_playoff_scores_are_rejected() {
    let mut t = playoff(&["A", "B", "C", "D"]);
    let before = snapshot(&t);
    let err = record_playoff_match(&mut t, PlayoffSlot::Semifinal1, Score::new(MAX_GOALS + 1, 0)).unwrap_err();
    assert_eq!(err, TournamentError::InvalidScore(i64::from(MAX_GOALS + 1)));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(snapshot(&t), before);
}

#[test]
fn later_rounds_wait_for_semifinals() {
    let mut t = playoff(&["A", "B", "C", "D"]);
    record_playoff_match(&mut t, PlayoffSlot::Semifinal1, Score::new(3, 0)).unwrap();
    for slot in [PlayoffSlot::ThirdPlace, PlayoffSlot::Final] {
        let err = record_playoff_match(&mut t, slot, Score::new(1, 0)).unwrap_err();
        assert_eq!(err, TournamentError::ParticipantsUnset(slot));
        assert_eq!(err.kind(), ErrorKind::NotReady);
    }
}

#[test]
fn played_playoff_match_cannot_be_overwritten() {
    let mut t = playoff(&["A", "B", "C", "D"]);
    record_playoff_match(&mut t, PlayoffSlot::Semifinal1, Score::new(3, 0)).unwrap();
    let err = record_playoff_match(&mut t, PlayoffSlot::Semifinal1, Score::new(0, 3)).unwrap_err();
    assert_eq!(err, TournamentError::AlreadyRecorded);
}

#[test]
fn direct_final_for_three_entrants() {
    let mut t = group_stage(&["Ann", "Bo", "Cy"]);
    play(&mut t, "Ann", 3, "Bo", 1);
    play(&mut t, "Ann", 2, "Cy", 2);
    play(&mut t, "Bo", 0, "Cy", 0);
    advance_to_playoff(&mut t).unwrap();

    assert_eq!(pairing(&t, PlayoffSlot::Final), pair("Ann", "Cy"));
    let err = record_playoff_match(&mut t, PlayoffSlot::Semifinal1, Score::new(1, 0)).unwrap_err();
    assert_eq!(err, TournamentError::SlotNotInBracket(PlayoffSlot::Semifinal1));

    let view = bracket_view(&t).unwrap();
    assert_eq!(view.phase, BracketPhase::FinalPending);
    assert_eq!(view.slots.len(), 1);
    assert!(view.slots[0].recordable);

    record_playoff_match(&mut t, PlayoffSlot::Final, Score::new(2, 1)).unwrap();
    assert_eq!(bracket_view(&t).unwrap().champion.as_deref(), Some("Ann"));
}

#[test]
fn bracket_view_shows_unset_participants_and_recordability() {
    let mut t = playoff(&["A", "B", "C", "D", "E"]);
    let view = bracket_view(&t).unwrap();
    let slot = |v: &cup_tournament_web::BracketView, s: PlayoffSlot| v.slots.iter().find(|x| x.slot == s).cloned().unwrap();
    assert_eq!(view.seeds, ["A", "B", "C", "D"]);
    assert!(slot(&view, PlayoffSlot::Semifinal1).recordable);
    let final_slot = slot(&view, PlayoffSlot::Final);
    assert_eq!((final_slot.home, final_slot.away, final_slot.recordable), (None, None, false));

    record_playoff_match(&mut t, PlayoffSlot::Semifinal1, Score::new(1, 0)).unwrap();
    record_playoff_match(&mut t, PlayoffSlot::Semifinal2, Score::new(1, 0)).unwrap();
    let view = bracket_view(&t).unwrap();
    assert!(slot(&view, PlayoffSlot::ThirdPlace).recordable);
    assert!(!slot(&view, PlayoffSlot::Final).recordable);
    assert_eq!(slot(&view, PlayoffSlot::Semifinal1).winner.as_deref(), Some("A"));
    assert_eq!(view.champion, None);
}

#[test]
fn correcting_a_semifinal_withdraws_later_pairings() {
    let mut t = playoff(&["A", "B", "C", "D"]);
    record_playoff_match(&mut t, PlayoffSlot::Semifinal1, Score::new(2, 1)).unwrap();
    record_playoff_match(&mut t, PlayoffSlot::Semifinal2, Score::new(0, 3)).unwrap();

    assert_eq!(t.bracket.as_ref().unwrap().phase(), BracketPhase::ThirdAndFinalPending);

    correct_playoff_match(&mut t, PlayoffSlot::Semifinal2).unwrap();
    assert_eq!(pairing(&t, PlayoffSlot::Final), None);
    assert_eq!(pairing(&t, PlayoffSlot::ThirdPlace), None);
    assert_eq!(t.bracket.as_ref().unwrap().phase(), BracketPhase::SemisPending);

    record_playoff_match(&mut t, PlayoffSlot::Semifinal2, Score::new(4, 0)).unwrap();
    assert_eq!(pairing(&t, PlayoffSlot::Final), pair("A", "B"));
    assert_eq!(pairing(&t, PlayoffSlot::ThirdPlace), pair("D", "C"));
}

#[test]
fn corrections_respect_later_results() {
    let mut t = playoff(&["A", "B", "C", "D"]);
    assert_eq!(
        correct_playoff_match(&mut t, PlayoffSlot::Semifinal1),
        Err(TournamentError::NotRecorded)
    );
    record_playoff_match(&mut t, PlayoffSlot::Semifinal1, Score::new(2, 1)).unwrap();
    record_playoff_match(&mut t, PlayoffSlot::Semifinal2, Score::new(0, 3)).unwrap();
    record_playoff_match(&mut t, PlayoffSlot::ThirdPlace, Score::new(1, 0)).unwrap();

    let err = correct_playoff_match(&mut t, PlayoffSlot::Semifinal1).unwrap_err();
    assert_eq!(err, TournamentError::LaterMatchRecorded(PlayoffSlot::Semifinal1));
    assert_eq!(err.kind(), ErrorKind::Sequence);

    record_playoff_match(&mut t, PlayoffSlot::Final, Score::new(0, 2)).unwrap();
    assert!(correct_playoff_match(&mut t, PlayoffSlot::ThirdPlace).is_err());

    correct_playoff_match(&mut t, PlayoffSlot::Final).unwrap();
    assert_eq!(t.bracket.as_ref().unwrap().phase(), BracketPhase::ThirdAndFinalPending);
    record_playoff_match(&mut t, PlayoffSlot::Final, Score::new(2, 0)).unwrap();
    assert_eq!(bracket_view(&t).unwrap().champion.as_deref(), Some("A"));
}

#[test]
fn slot_keys_parse() {
    assert_eq!("FINAL".parse::<PlayoffSlot>(), Ok(PlayoffSlot::Final));
    assert_eq!("sf2".parse::<PlayoffSlot>(), Ok(PlayoffSlot::Semifinal2));
    assert_eq!("3RD".parse::<PlayoffSlot>(), Ok(PlayoffSlot::ThirdPlace));
    let err = "QF1".parse::<PlayoffSlot>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(PlayoffSlot::ThirdPlace.to_string(), "3RD");
}

#[test]
fn bracket_view_needs_playoff_stage() {
    let t = group_stage(&["A", "B", "C"]);
    assert_eq!(bracket_view(&t).unwrap_err().kind(), ErrorKind::State);
}
