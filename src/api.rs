//! REST API over an in-memory session map of tournaments.
//!
//! Every handler takes the write lock for the whole operation, so mutations on a
//! tournament never overlap. Entries untouched for longer than the configured
//! inactivity timeout are dropped by [`purge_inactive`].

use crate::logic::{
    advance_to_playoff, bracket_view, correct_group_match, correct_playoff_match, final_stats,
    final_stats_csv, group_progress, record_group_match, record_playoff_match, register_entrants,
    standings, standings_csv,
};
use crate::models::{Entrant, ErrorKind, MatchId, PlayoffSlot, Score, Tournament, TournamentError, TournamentId};
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
pub struct TournamentEntry {
    pub tournament: Tournament,
    pub last_activity: Instant,
}

impl TournamentEntry {
    pub fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            last_activity: Instant::now(),
        }
    }
}

pub type Sessions = RwLock<HashMap<TournamentId, TournamentEntry>>;

/// Shared application state handed to every handler.
pub type AppState = Data<Sessions>;

pub fn new_state() -> AppState {
    Data::new(RwLock::new(HashMap::new()))
}

/// Write access to the session map. A poisoned lock is cleared and the map kept,
/// so one panicking request cannot take every tournament down with it.
fn sessions(state: &Sessions) -> RwLockWriteGuard<'_, HashMap<TournamentId, TournamentEntry>> {
    state.write().unwrap_or_else(|poisoned| {
        log::error!("Session lock was poisoned by a panicking request; recovering");
        state.clear_poison();
        poisoned.into_inner()
    })
}

/// Drop tournaments idle for at least `timeout`. Returns how many were removed.
pub fn purge_inactive(state: &Sessions, timeout: Duration) -> usize {
    let mut g = sessions(state);
    let before = g.len();
    g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
    before - g.len()
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct EntrantBody {
    name: String,
    #[serde(default)]
    team: String,
}

#[derive(Deserialize)]
struct RegisterBody {
    entrants: Vec<EntrantBody>,
}

/// Raw scores; checked by `Score::from_raw` so missing or negative values get a proper error.
#[derive(Deserialize)]
struct ScoreBody {
    score_home: Option<i64>,
    score_away: Option<i64>,
}

impl ScoreBody {
    fn score(&self) -> Result<Score, TournamentError> {
        Score::from_raw(self.score_home, self.score_away)
    }
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and group match id.
#[derive(Deserialize)]
struct GroupMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

/// Path segments: tournament id and playoff slot key (SF1, SF2, 3RD, FINAL).
#[derive(Deserialize)]
struct PlayoffPath {
    id: TournamentId,
    slot: String,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    log::warn!("Rejected: {}", e);
    let body = serde_json::json!({ "error": e.to_string(), "kind": e.kind() });
    match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
        ErrorKind::NotReady | ErrorKind::Sequence | ErrorKind::State => HttpResponse::Conflict().json(body),
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Run `op` on the tournament `id` under the write lock, refreshing its activity time.
/// On success the response is the whole tournament.
fn mutate<F>(state: &Sessions, id: TournamentId, op: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = sessions(state);
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match op(&mut *t) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    }
}

/// Run a read-only `op` on the tournament `id` (still refreshes its activity time).
fn read<F>(state: &Sessions, id: TournamentId, op: F) -> HttpResponse
where
    F: FnOnce(&Tournament) -> HttpResponse,
{
    let mut g = sessions(state);
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            op(&entry.tournament)
        }
        None => not_found(),
    }
}

fn csv_response(result: Result<String, csv::Error>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(body),
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError().body("export error")
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "cup-tournament-web",
    })
}

/// Create a new, empty tournament (client stores the id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState) -> HttpResponse {
    let tournament = Tournament::new();
    let id = tournament.id;
    let mut g = sessions(&state);
    let entry = g.entry(id).or_insert(TournamentEntry::new(tournament));
    log::info!("Created tournament {}", id);
    HttpResponse::Ok().json(&entry.tournament)
}

/// Resume a tournament from a JSON snapshot (replaces any session with the same id).
#[post("/api/tournaments/import")]
async fn api_import_tournament(state: AppState, body: Json<Tournament>) -> HttpResponse {
    let tournament = body.into_inner();
    if let Err(e) = tournament.check_snapshot() {
        return error_response(&e);
    }
    let id = tournament.id;
    let mut g = sessions(&state);
    g.insert(id, TournamentEntry::new(tournament));
    log::info!("Imported tournament {}", id);
    HttpResponse::Ok().json(&g[&id].tournament)
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    read(&state, path.id, |t| HttpResponse::Ok().json(t))
}

/// Register the field (Registration -> Group).
#[post("/api/tournaments/{id}/register")]
async fn api_register(state: AppState, path: Path<TournamentPath>, body: Json<RegisterBody>) -> HttpResponse {
    let entrants: Vec<Entrant> = body
        .into_inner()
        .entrants
        .into_iter()
        .map(|e| Entrant::new(e.name, e.team))
        .collect();
    mutate(&state, path.id, |t| register_entrants(t, entrants))
}

/// Record a group match result.
#[put("/api/tournaments/{id}/group/{match_id}")]
async fn api_record_group_match(
    state: AppState,
    path: Path<GroupMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    mutate(&state, path.id, |t| record_group_match(t, path.match_id, body.score()?))
}

/// Correct (reset) a group match result.
#[delete("/api/tournaments/{id}/group/{match_id}")]
async fn api_correct_group_match(state: AppState, path: Path<GroupMatchPath>) -> HttpResponse {
    mutate(&state, path.id, |t| correct_group_match(t, path.match_id))
}

/// Group table plus progress.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    read(&state, path.id, |t| match standings(t) {
        Ok(rows) => HttpResponse::Ok().json(serde_json::json!({
            "rows": rows,
            "progress": group_progress(t),
            "promotion_quota": t.promotion_quota(),
        })),
        Err(e) => error_response(&e),
    })
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    read(&state, path.id, |t| match standings(t) {
        Ok(rows) => csv_response(standings_csv(&rows)),
        Err(e) => error_response(&e),
    })
}

/// Close the group and build the bracket (Group -> Playoff).
#[post("/api/tournaments/{id}/playoff")]
async fn api_advance_to_playoff(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, advance_to_playoff)
}

#[get("/api/tournaments/{id}/bracket")]
async fn api_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    read(&state, path.id, |t| match bracket_view(t) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(&e),
    })
}

/// Record a playoff result (slot: SF1, SF2, 3RD, FINAL).
#[put("/api/tournaments/{id}/playoff/{slot}")]
async fn api_record_playoff_match(
    state: AppState,
    path: Path<PlayoffPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    mutate(&state, path.id, |t| {
        let slot: PlayoffSlot = path.slot.parse()?;
        record_playoff_match(t, slot, body.score()?)
    })
}

/// Correct (reset) a playoff result.
#[delete("/api/tournaments/{id}/playoff/{slot}")]
async fn api_correct_playoff_match(state: AppState, path: Path<PlayoffPath>) -> HttpResponse {
    mutate(&state, path.id, |t| {
        let slot: PlayoffSlot = path.slot.parse()?;
        correct_playoff_match(t, slot)
    })
}

#[get("/api/tournaments/{id}/final-stats")]
async fn api_final_stats(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    read(&state, path.id, |t| match final_stats(t) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(&e),
    })
}

#[get("/api/tournaments/{id}/final-stats.csv")]
async fn api_final_stats_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    read(&state, path.id, |t| match final_stats(t) {
        Ok(rows) => csv_response(final_stats_csv(&rows)),
        Err(e) => error_response(&e),
    })
}

/// Discard everything and return to Registration (same id).
#[post("/api/tournaments/{id}/reset")]
async fn api_reset(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, |t| {
        t.reset();
        Ok(())
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Register every route. The import route comes before the `{id}` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(favicon)
        .service(api_create_tournament)
        .service(api_import_tournament)
        .service(api_get_tournament)
        .service(api_register)
        .service(api_record_group_match)
        .service(api_correct_group_match)
        .service(api_standings)
        .service(api_standings_csv)
        .service(api_advance_to_playoff)
        .service(api_bracket)
        .service(api_record_playoff_match)
        .service(api_correct_playoff_match)
        .service(api_final_stats)
        .service(api_final_stats_csv)
        .service(api_reset);
}

