//! Playoff rounds: semifinals, third place and final (or a direct final for three entrants).

use crate::models::{
    Bracket, BracketPhase, Match, PlayoffSlot, Round, Score, Stage, Tournament, TournamentError,
};
use serde::Serialize;

/// One bracket slot as shown to the user.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SlotView {
    pub slot: PlayoffSlot,
    /// None until the feeder matches are decided.
    pub home: Option<String>,
    pub away: Option<String>,
    pub score: Option<Score>,
    pub winner: Option<String>,
    /// A result can be entered right now.
    pub recordable: bool,
}

/// Read-only picture of the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BracketView {
    pub phase: BracketPhase,
    pub seeds: Vec<String>,
    pub slots: Vec<SlotView>,
    pub champion: Option<String>,
}

fn playoff_bracket(tournament: &Tournament) -> Result<&Bracket, TournamentError> {
    tournament.require_stage(Stage::Playoff)?;
    tournament
        .bracket
        .as_ref()
        .ok_or(TournamentError::InvalidStage {
            actual: tournament.stage,
        })
}

fn playoff_bracket_mut(tournament: &mut Tournament) -> Result<&mut Bracket, TournamentError> {
    tournament.require_stage(Stage::Playoff)?;
    let actual = tournament.stage;
    tournament
        .bracket
        .as_mut()
        .ok_or(TournamentError::InvalidStage { actual })
}

/// Check whether `slot` can take a result now (without the draw check).
fn check_recordable(bracket: &Bracket, slot: PlayoffSlot) -> Result<&Match, TournamentError> {
    if !bracket.has_slot(slot) {
        return Err(TournamentError::SlotNotInBracket(slot));
    }
    let m = bracket
        .get(slot)
        .ok_or(TournamentError::ParticipantsUnset(slot))?;
    if m.is_played() {
        return Err(TournamentError::AlreadyRecorded);
    }
    if slot == PlayoffSlot::Final {
        if let Some(third) = bracket.get(PlayoffSlot::ThirdPlace) {
            if !third.is_played() {
                return Err(TournamentError::ThirdPlaceFirst);
            }
        }
    }
    Ok(m)
}

/// Once both semifinals have results, draw third place (the losers) and final (the winners).
fn draw_third_and_final(bracket: &mut Bracket) {
    let Bracket::Seeded {
        semifinal_1,
        semifinal_2,
        third_place,
        final_match,
    } = bracket
    else {
        return;
    };
    if final_match.is_some() {
        return;
    }
    let (Some(w1), Some(l1), Some(w2), Some(l2)) = (
        semifinal_1.winner(),
        semifinal_1.loser(),
        semifinal_2.winner(),
        semifinal_2.loser(),
    ) else {
        return;
    };
    *third_place = Some(Match::new(l1, l2, Round::ThirdPlace));
    *final_match = Some(Match::new(w1, w2, Round::Final));
    log::info!("Semifinals done: final {} vs {}, third place {} vs {}", w1, w2, l1, l2);
}

/// Record a playoff result.
///
/// Knockout matches need a winner (draws are rejected), the slot must have both
/// participants and no result yet, and in a four-seed bracket the third place
/// match must be recorded before the final.
pub fn record_playoff_match(
    tournament: &mut Tournament,
    slot: PlayoffSlot,
    score: Score,
) -> Result<(), TournamentError> {
    let bracket = playoff_bracket_mut(tournament)?;
    check_recordable(bracket, slot)?;
    let score = score.checked()?;
    if score.is_draw() && !slot.round().allows_draw() {
        return Err(TournamentError::DrawNotAllowed(slot));
    }

    let m = bracket
        .get_mut(slot)
        .ok_or(TournamentError::ParticipantsUnset(slot))?;
    m.record(score);
    log::debug!("{}: {} {}:{} {}", slot, m.home, score.home, score.away, m.away);

    draw_third_and_final(bracket);
    if bracket.is_complete() {
        if let Some(champion) = bracket.final_match().and_then(Match::winner) {
            log::info!("Playoff complete, champion {}", champion);
        }
    }
    Ok(())
}

/// Reset a played playoff match.
///
/// A semifinal can only be corrected while neither third place nor final has a
/// result; doing so withdraws both pairings again. Third place is locked once
/// the final is played. The final can always be corrected.
pub fn correct_playoff_match(tournament: &mut Tournament, slot: PlayoffSlot) -> Result<(), TournamentError> {
    let bracket = playoff_bracket_mut(tournament)?;
    if !bracket.has_slot(slot) {
        return Err(TournamentError::SlotNotInBracket(slot));
    }
    fn played(b: &Bracket, s: PlayoffSlot) -> bool {
        b.get(s).is_some_and(Match::is_played)
    }
    if !played(bracket, slot) {
        return Err(TournamentError::NotRecorded);
    }
    let later_recorded = match slot {
        PlayoffSlot::Semifinal1 | PlayoffSlot::Semifinal2 => {
            played(bracket, PlayoffSlot::ThirdPlace) || played(bracket, PlayoffSlot::Final)
        }
        PlayoffSlot::ThirdPlace => played(bracket, PlayoffSlot::Final),
        PlayoffSlot::Final => false,
    };
    if later_recorded {
        return Err(TournamentError::LaterMatchRecorded(slot));
    }

    if let Some(m) = bracket.get_mut(slot) {
        m.clear();
    }
    if let Bracket::Seeded {
        third_place,
        final_match,
        ..
    } = bracket
    {
        if slot.round() == Round::Semifinal {
            *third_place = None;
            *final_match = None;
        }
    }
    log::debug!("{} reset to unplayed", slot);
    Ok(())
}

/// Pairings, results and state per slot.
pub fn bracket_view(tournament: &Tournament) -> Result<BracketView, TournamentError> {
    let bracket = playoff_bracket(tournament)?;
    let slots = bracket
        .slots()
        .iter()
        .map(|&slot| {
            let m = bracket.get(slot);
            SlotView {
                slot,
                home: m.map(|m| m.home.clone()),
                away: m.map(|m| m.away.clone()),
                score: m.and_then(|m| m.score),
                winner: m.and_then(Match::winner).map(str::to_string),
                recordable: check_recordable(bracket, slot).is_ok(),
            }
        })
        .collect();
    let champion = if bracket.is_complete() {
        bracket.final_match().and_then(Match::winner).map(str::to_string)
    } else {
        None
    };
    Ok(BracketView {
        phase: bracket.phase(),
        seeds: tournament.seeds.clone(),
        slots,
        champion,
    })
}
