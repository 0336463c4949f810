//! Single binary web server: JSON API over the match and standings engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, INACTIVITY_HOURS, COURTS, SLOT_MINUTES.

use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tournament_dashboard::{
    apply_pool_lineups, assign_pool_side, assign_time_slots, cancel_match, complete_composite,
    complete_match, compute_standings, draw_into_pools, generate_pool_matches,
    import_participants, override_score, record_sub_game_score, reschedule,
    set_pool_sub_game_players, start_match, write_standings_csv, CompetitionType, EngineError,
    FinalScore, LiveScoreSession, MatchId, Participant, ParticipantId, Player, PlayerId, Pool,
    PoolId, SchedulePlan, ServerConfig, Side,
};

/// Per-pool entry: pool data, open live-scoring sessions, last activity time (for auto-cleanup).
struct PoolEntry {
    pool: Pool,
    live: HashMap<MatchId, LiveScoreSession>,
    last_activity: Instant,
}

/// In-memory state: many pools by ID. Entries are removed after the inactivity timeout.
type AppState = Data<RwLock<HashMap<PoolId, PoolEntry>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreatePoolBody {
    name: String,
    #[serde(default)]
    competition: CompetitionType,
    #[serde(default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    8
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum AddParticipantBody {
    Team {
        name: String,
        #[serde(default)]
        players: Vec<String>,
    },
    Individual {
        name: String,
    },
    Pair {
        player_one: String,
        #[serde(default)]
        player_two: Option<String>,
    },
}

impl AddParticipantBody {
    fn into_participant(self) -> Participant {
        match self {
            AddParticipantBody::Team { name, players } => {
                Participant::team(name.trim(), players.iter().map(|p| Player::new(p.trim())).collect())
            }
            AddParticipantBody::Individual { name } => Participant::individual(name.trim()),
            AddParticipantBody::Pair {
                player_one,
                player_two,
            } => Participant::pair(player_one.trim(), player_two.map(|p| p.trim().to_string())),
        }
    }
}

#[derive(Deserialize)]
struct CompetitionBody {
    competition: CompetitionType,
}

#[derive(Deserialize)]
struct ScheduleBody {
    start: DateTime<Utc>,
    #[serde(default)]
    slot_minutes: Option<i64>,
    #[serde(default)]
    venues: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct ScoreBody {
    side_one: u32,
    side_two: u32,
    #[serde(default)]
    winner: Option<Side>,
}

impl ScoreBody {
    fn final_score(&self) -> FinalScore {
        FinalScore {
            side_one: self.side_one,
            side_two: self.side_two,
            winner: self.winner,
        }
    }
}

#[derive(Deserialize)]
struct RescheduleBody {
    #[serde(default)]
    scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    venue: Option<String>,
}

#[derive(Deserialize)]
struct AssignBody {
    participant_id: ParticipantId,
}

#[derive(Deserialize)]
struct SubGamePlayersBody {
    side: Side,
    players: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct PointBody {
    side: Side,
    #[serde(default)]
    remove: bool,
}

#[derive(Deserialize)]
struct DrawBody {
    pool_ids: Vec<PoolId>,
    names: Vec<String>,
}

/// Path segment: pool id (e.g. /api/pools/{id})
#[derive(Deserialize)]
struct PoolPath {
    id: PoolId,
}

#[derive(Deserialize)]
struct PoolParticipantPath {
    id: PoolId,
    participant_id: ParticipantId,
}

#[derive(Deserialize)]
struct PoolMatchPath {
    id: PoolId,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct PoolMatchSidePath {
    id: PoolId,
    match_id: MatchId,
    side: Side,
}

#[derive(Deserialize)]
struct SubGamePath {
    id: PoolId,
    match_id: MatchId,
    index: usize,
}

fn error_response(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No pool" }))
}

/// Look up a pool, refresh its activity time, and run `op` on it under the write lock.
fn with_pool<F>(state: &AppState, id: PoolId, op: F) -> HttpResponse
where
    F: FnOnce(&mut PoolEntry) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            op(entry)
        }
        None => not_found(),
    }
}

/// Run an engine operation on a pool; respond with the updated pool or the error.
fn update_pool<F>(state: &AppState, id: PoolId, op: F) -> HttpResponse
where
    F: FnOnce(&mut PoolEntry) -> Result<(), EngineError>,
{
    with_pool(state, id, |entry| match op(&mut *entry) {
        Ok(()) => HttpResponse::Ok().json(&entry.pool),
        Err(e) => error_response(e),
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-dashboard",
    })
}

/// Create a new pool (returns it with id; client stores id for subsequent requests).
#[post("/api/pools")]
async fn api_create_pool(state: AppState, body: Json<CreatePoolBody>) -> HttpResponse {
    let body = body.into_inner();
    if body.name.trim().is_empty() {
        return error_response(EngineError::EmptyName);
    }
    let pool = Pool::new(body.name.trim(), body.competition, body.capacity);
    let response = HttpResponse::Ok().json(&pool);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        pool.id,
        PoolEntry {
            pool,
            live: HashMap::new(),
            last_activity: Instant::now(),
        },
    );
    response
}

#[get("/api/pools/{id}")]
async fn api_get_pool(state: AppState, path: Path<PoolPath>) -> HttpResponse {
    with_pool(&state, path.id, |entry| HttpResponse::Ok().json(&entry.pool))
}

#[delete("/api/pools/{id}")]
async fn api_delete_pool(state: AppState, path: Path<PoolPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove(&path.id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => not_found(),
    }
}

/// Change the competition type (only while the pool has no matches).
#[put("/api/pools/{id}/competition")]
async fn api_set_competition(state: AppState, path: Path<PoolPath>, body: Json<CompetitionBody>) -> HttpResponse {
    update_pool(&state, path.id, |e| e.pool.set_competition_type(body.competition))
}

#[post("/api/pools/{id}/participants")]
async fn api_add_participant(
    state: AppState,
    path: Path<PoolPath>,
    body: Json<AddParticipantBody>,
) -> HttpResponse {
    let participant = body.into_inner().into_participant();
    update_pool(&state, path.id, |e| e.pool.add_participant(participant))
}

/// Import participants from header-less CSV in the request body.
#[post("/api/pools/{id}/participants/import")]
async fn api_import_participants(state: AppState, path: Path<PoolPath>, body: Bytes) -> HttpResponse {
    with_pool(&state, path.id, |entry| {
        let participants = match import_participants(body.as_ref(), entry.pool.competition) {
            Ok(p) => p,
            Err(e) => return error_response(e),
        };
        for p in participants {
            if let Err(e) = entry.pool.add_participant(p) {
                return error_response(e);
            }
        }
        HttpResponse::Ok().json(&entry.pool)
    })
}

#[delete("/api/pools/{id}/participants/{participant_id}")]
async fn api_remove_participant(state: AppState, path: Path<PoolParticipantPath>) -> HttpResponse {
    update_pool(&state, path.id, |e| {
        e.pool.remove_participant(path.participant_id).map(|_| ())
    })
}

/// Generate the round-robin. Appends; clear first to regenerate.
#[post("/api/pools/{id}/matches/generate")]
async fn api_generate_matches(state: AppState, path: Path<PoolPath>) -> HttpResponse {
    update_pool(&state, path.id, |e| generate_pool_matches(&mut e.pool).map(|_| ()))
}

#[delete("/api/pools/{id}/matches")]
async fn api_clear_matches(state: AppState, path: Path<PoolPath>) -> HttpResponse {
    update_pool(&state, path.id, |e| {
        e.pool.clear_matches();
        e.live.clear();
        Ok(())
    })
}

/// Assign sequential time slots and venues to every match of the pool.
#[post("/api/pools/{id}/matches/schedule")]
async fn api_schedule_matches(
    state: AppState,
    config: Data<ServerConfig>,
    path: Path<PoolPath>,
    body: Json<ScheduleBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let minutes = body.slot_minutes.unwrap_or(config.slot_minutes);
    let Some(slot_length) = ChronoDuration::try_minutes(minutes) else {
        return error_response(EngineError::ScheduleOverflow);
    };
    let plan = SchedulePlan::new(
        body.start,
        slot_length,
        body.venues.unwrap_or_else(|| config.venues.clone()),
    );
    update_pool(&state, path.id, |e| assign_time_slots(&mut e.pool.matches, &plan))
}

#[post("/api/pools/{id}/matches/{match_id}/start")]
async fn api_start_match(state: AppState, path: Path<PoolMatchPath>) -> HttpResponse {
    update_pool(&state, path.id, |e| e.pool.apply(path.match_id, start_match))
}

/// Complete a match. Composite matches ignore the body and are completed from their games.
#[post("/api/pools/{id}/matches/{match_id}/complete")]
async fn api_complete_match(
    state: AppState,
    path: Path<PoolMatchPath>,
    body: Option<Json<ScoreBody>>,
) -> HttpResponse {
    update_pool(&state, path.id, |e| {
        let composite = e
            .pool
            .get_match(path.match_id)
            .map(|m| m.is_composite())
            .unwrap_or(false);
        if composite {
            return e.pool.apply(path.match_id, complete_composite);
        }
        let score = match &body {
            Some(b) => b.final_score(),
            None => {
                let m = e.pool.get_match_mut(path.match_id)?;
                let (one, two) = m.scores();
                FinalScore::new(one, two)
            }
        };
        e.live.remove(&path.match_id);
        e.pool.apply(path.match_id, |m| complete_match(m, score))
    })
}

#[post("/api/pools/{id}/matches/{match_id}/cancel")]
async fn api_cancel_match(state: AppState, path: Path<PoolMatchPath>) -> HttpResponse {
    update_pool(&state, path.id, |e| {
        e.live.remove(&path.match_id);
        e.pool.apply(path.match_id, cancel_match)
    })
}

/// Administrative score correction of a completed match.
#[put("/api/pools/{id}/matches/{match_id}/override")]
async fn api_override_score(
    state: AppState,
    path: Path<PoolMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let score = body.final_score();
    update_pool(&state, path.id, |e| {
        e.pool.apply(path.match_id, |m| override_score(m, score))
    })
}

#[put("/api/pools/{id}/matches/{match_id}/schedule")]
async fn api_reschedule_match(
    state: AppState,
    path: Path<PoolMatchPath>,
    body: Json<RescheduleBody>,
) -> HttpResponse {
    let body = body.into_inner();
    update_pool(&state, path.id, |e| {
        e.pool
            .apply(path.match_id, |m| reschedule(m, body.scheduled_at, body.venue))
    })
}

/// Fill a placeholder side with a participant of the pool.
#[put("/api/pools/{id}/matches/{match_id}/sides/{side}")]
async fn api_assign_side(
    state: AppState,
    path: Path<PoolMatchSidePath>,
    body: Json<AssignBody>,
) -> HttpResponse {
    update_pool(&state, path.id, |e| {
        assign_pool_side(&mut e.pool, path.match_id, path.side, body.participant_id)
    })
}

/// Fill both sides' empty game slots from the teams' roster order.
#[post("/api/pools/{id}/matches/{match_id}/lineup")]
async fn api_apply_lineups(state: AppState, path: Path<PoolMatchPath>) -> HttpResponse {
    update_pool(&state, path.id, |e| apply_pool_lineups(&mut e.pool, path.match_id))
}

#[put("/api/pools/{id}/matches/{match_id}/games/{index}/players")]
async fn api_set_game_players(
    state: AppState,
    path: Path<SubGamePath>,
    body: Json<SubGamePlayersBody>,
) -> HttpResponse {
    let body = body.into_inner();
    update_pool(&state, path.id, |e| {
        set_pool_sub_game_players(&mut e.pool, path.match_id, path.index, body.side, body.players)
    })
}

/// Score one game of a team match; the match score and winner follow automatically.
#[put("/api/pools/{id}/matches/{match_id}/games/{index}/score")]
async fn api_score_game(state: AppState, path: Path<SubGamePath>, body: Json<ScoreBody>) -> HttpResponse {
    update_pool(&state, path.id, |e| {
        e.pool.apply_optional(path.match_id, |m| {
            record_sub_game_score(m, path.index, body.side_one, body.side_two)
        })
    })
}

/// Open (or continue) the live session of an in-progress match and return its snapshot.
#[get("/api/pools/{id}/matches/{match_id}/live")]
async fn api_live_snapshot(state: AppState, path: Path<PoolMatchPath>) -> HttpResponse {
    with_pool(&state, path.id, |entry| {
        if let Some(session) = entry.live.get(&path.match_id) {
            return HttpResponse::Ok().json(session.snapshot());
        }
        let session = match entry
            .pool
            .get_match(path.match_id)
            .ok_or(EngineError::MatchNotFound(path.match_id))
            .and_then(LiveScoreSession::open)
        {
            Ok(s) => s,
            Err(e) => return error_response(e),
        };
        let snapshot = session.snapshot();
        entry.live.insert(path.match_id, session);
        HttpResponse::Ok().json(snapshot)
    })
}

/// Add or remove one point in the live session and write the score through to the match.
#[post("/api/pools/{id}/matches/{match_id}/live/point")]
async fn api_live_point(state: AppState, path: Path<PoolMatchPath>, body: Json<PointBody>) -> HttpResponse {
    with_pool(&state, path.id, |entry| {
        let Some(session) = entry.live.get_mut(&path.match_id) else {
            return error_response("No live session for this match");
        };
        if body.remove {
            session.remove_point(body.side);
        } else {
            session.add_point(body.side);
        }
        let result = entry
            .pool
            .get_match_mut(path.match_id)
            .and_then(|m| session.commit(m));
        match result {
            Ok(()) => HttpResponse::Ok().json(session.snapshot()),
            Err(e) => error_response(e),
        }
    })
}

/// Swap which side is drawn on the left. Display only; the match is untouched.
#[post("/api/pools/{id}/matches/{match_id}/live/switch")]
async fn api_live_switch(state: AppState, path: Path<PoolMatchPath>) -> HttpResponse {
    with_pool(&state, path.id, |entry| match entry.live.get_mut(&path.match_id) {
        Some(session) => {
            session.switch_sides();
            HttpResponse::Ok().json(session.snapshot())
        }
        None => error_response("No live session for this match"),
    })
}

#[get("/api/pools/{id}/standings")]
async fn api_standings(state: AppState, path: Path<PoolPath>) -> HttpResponse {
    with_pool(&state, path.id, |entry| {
        match compute_standings(&entry.pool.participants, &entry.pool.matches) {
            Ok(rows) => HttpResponse::Ok().json(rows),
            Err(e) => error_response(e),
        }
    })
}

#[get("/api/pools/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<PoolPath>) -> HttpResponse {
    with_pool(&state, path.id, |entry| {
        let rows = match compute_standings(&entry.pool.participants, &entry.pool.matches) {
            Ok(rows) => rows,
            Err(e) => return error_response(e),
        };
        let mut buf = Vec::new();
        match write_standings_csv(&rows, &mut buf) {
            Ok(()) => HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .body(buf),
            Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
        }
    })
}

#[get("/api/pools/{id}/audit")]
async fn api_audit(state: AppState, path: Path<PoolPath>) -> HttpResponse {
    with_pool(&state, path.id, |entry| HttpResponse::Ok().json(&entry.pool.audit))
}

/// Spin-wheel: randomly place new entrants (by name) into the given pools.
#[post("/api/draw")]
async fn api_draw(state: AppState, body: Json<DrawBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut pools = Vec::with_capacity(body.pool_ids.len());
    for id in &body.pool_ids {
        match g.get(id) {
            Some(entry) => pools.push(entry.pool.clone()),
            None => return not_found(),
        }
    }
    let Some(competition) = pools.first().map(|p| p.competition) else {
        return error_response("No pools given");
    };
    let entrants: Vec<Participant> = body
        .names
        .iter()
        .map(|name| match competition {
            CompetitionType::Team => Participant::team(name.trim(), Vec::new()),
            CompetitionType::Individual => Participant::individual(name.trim()),
            CompetitionType::Pair => Participant::pair(name.trim(), None),
        })
        .collect();
    if let Err(e) = draw_into_pools(entrants, &mut pools, &mut rand::thread_rng()) {
        return error_response(e);
    }
    for pool in &pools {
        if let Some(entry) = g.get_mut(&pool.id) {
            entry.pool = pool.clone();
            entry.last_activity = Instant::now();
        }
    }
    HttpResponse::Ok().json(pools)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(RwLock::new(HashMap::<PoolId, PoolEntry>::new()));
    let config_data = Data::new(config.clone());

    // Background task: every 30 minutes, remove pools inactive past the timeout
    let state_cleanup = state.clone();
    let timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive pool(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config_data.clone())
            .service(api_health)
            .service(api_create_pool)
            .service(api_get_pool)
            .service(api_delete_pool)
            .service(api_set_competition)
            .service(api_add_participant)
            .service(api_import_participants)
            .service(api_remove_participant)
            .service(api_generate_matches)
            .service(api_clear_matches)
            .service(api_schedule_matches)
            .service(api_start_match)
            .service(api_complete_match)
            .service(api_cancel_match)
            .service(api_override_score)
            .service(api_reschedule_match)
            .service(api_assign_side)
            .service(api_apply_lineups)
            .service(api_set_game_players)
            .service(api_score_game)
            .service(api_live_snapshot)
            .service(api_live_point)
            .service(api_live_switch)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_audit)
            .service(api_draw)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
