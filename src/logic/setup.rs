//! Registration: validate the field, draw the schedule, move Registration -> Group.

use crate::logic::schedule::generate_schedule;
use crate::models::{validate_entrants, Entrant, Stage, Tournament, TournamentError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Register the field and start the group stage with a freshly drawn schedule seed.
pub fn register_entrants(
    tournament: &mut Tournament,
    entrants: Vec<Entrant>,
) -> Result<(), TournamentError> {
    let seed = rand::thread_rng().gen();
    register_entrants_seeded(tournament, entrants, seed)
}

/// Same as [`register_entrants`] with an explicit schedule seed (reproducible order).
pub fn register_entrants_seeded(
    tournament: &mut Tournament,
    entrants: Vec<Entrant>,
    seed: u64,
) -> Result<(), TournamentError> {
    tournament.require_stage(Stage::Registration)?;
    let entrants: Vec<Entrant> = entrants
        .into_iter()
        .map(|e| Entrant::new(e.name, e.team))
        .collect();
    validate_entrants(&entrants)?;

    let mut rng = StdRng::seed_from_u64(seed);
    tournament.group_matches = generate_schedule(&entrants, &mut rng);
    tournament.entrants = entrants;
    tournament.schedule_seed = Some(seed);
    tournament.stage = Stage::Group;
    log::info!(
        "Tournament {}: registered {} entrants, {} group matches",
        tournament.id,
        tournament.entrants.len(),
        tournament.group_matches.len()
    );
    Ok(())
}
