//! REST API over the match organizer. Each browser gets its own game, identified by a signed
//! session cookie; every mutation goes through the reducer under the write lock.

use crate::logic::{
    add_player, advance, import_players, move_player, parse_weight, perform_toss,
    remove_player, reset_to_step, select_captain, set_captain_choice, set_step,
    set_team_formation_complete, validate_weight,
};
use crate::models::{
    CoinFace, GameError, GameId, GameSession, Location, Notice, Player, TeamId, WizardStep,
};
use crate::seed::read_records;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

const GAME_ID_KEY: &str = "game_id";
const SESSION_COOKIE: &str = "cricket_game";

/// Per-game entry: game state + last activity time (for auto-cleanup).
pub struct GameEntry {
    pub game: GameSession,
    pub last_activity: Instant,
}

/// In-memory state shared by all workers.
pub struct AppState {
    pub games: RwLock<HashMap<GameId, GameEntry>>,
    /// Roster every new game starts from.
    pub seed: Vec<Player>,
}

impl AppState {
    pub fn new(seed: Vec<Player>) -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            seed,
        }
    }

    /// Drop games idle for at least `ttl`. Returns how many were removed.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let mut g = match self.games.write() {
            Ok(guard) => guard,
            Err(_) => return 0,
        };
        let before = g.len();
        g.retain(|_, entry| entry.last_activity.elapsed() < ttl);
        before - g.len()
    }
}

type SharedState = Data<AppState>;

/// Cookie-backed session middleware used by the server and the tests.
pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_string())
        .cookie_secure(secure)
        .build()
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct GameResponse<'a> {
    game: &'a GameSession,
    notice: Option<Notice>,
}

/// Weight as sent by the form: a JSON number or the raw input text.
#[derive(Deserialize)]
#[serde(untagged)]
enum WeightInput {
    Number(f64),
    Text(String),
}

impl WeightInput {
    fn value(&self) -> Result<f64, GameError> {
        match self {
            WeightInput::Number(n) => validate_weight(*n),
            WeightInput::Text(s) => parse_weight(s),
        }
    }
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    image_url: Option<String>,
    weight: WeightInput,
}

#[derive(Deserialize)]
struct MovePlayerBody {
    /// Drop target id: "all-players", "team-alpha" or "team-beta".
    destination: String,
}

#[derive(Deserialize)]
struct SelectCaptainBody {
    player_id: String,
}

#[derive(Deserialize)]
struct FormationBody {
    complete: bool,
}

#[derive(Deserialize)]
struct StepBody {
    step: WizardStep,
}

#[derive(Deserialize)]
struct TossCallBody {
    team_id: TeamId,
    face: CoinFace,
}

#[derive(Deserialize)]
struct PlayerPath {
    player_id: String,
}

#[derive(Deserialize)]
struct TeamPath {
    team_id: String,
}

fn no_game() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No game session" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn bad_request(e: &GameError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string(), "title": e.title() }))
}

fn current_game_id(session: &Session) -> Option<GameId> {
    session.get::<GameId>(GAME_ID_KEY).ok().flatten()
}

/// Run `action` against the caller's game and answer with the updated state.
fn with_game<F>(state: &AppState, session: &Session, action: F) -> HttpResponse
where
    F: FnOnce(&mut GameSession) -> Result<Option<Notice>, GameError>,
{
    let Some(id) = current_game_id(session) else {
        return no_game();
    };
    let mut g = match state.games.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return no_game(),
    };
    entry.last_activity = Instant::now();
    match action(&mut entry.game) {
        Ok(notice) => HttpResponse::Ok().json(GameResponse {
            game: &entry.game,
            notice,
        }),
        Err(e) => {
            log::debug!("game {}: rejected: {}", id, e);
            bad_request(&e)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "cricket-match-web",
    })
}

/// Start a new game from the seed roster, replacing the caller's current one.
#[post("/api/game")]
async fn api_new_game(state: SharedState, session: Session) -> HttpResponse {
    let game = GameSession::new(state.seed.clone());
    let id = game.id;
    let previous = current_game_id(&session);
    if session.insert(GAME_ID_KEY, id).is_err() {
        return HttpResponse::InternalServerError().body("session error");
    }
    let mut g = match state.games.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Some(prev) = previous {
        g.remove(&prev);
    }
    log::info!("game {}: started with {} players", id, game.pool().len());
    let entry = g.entry(id).or_insert(GameEntry {
        game,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(GameResponse {
        game: &entry.game,
        notice: None,
    })
}

#[get("/api/game")]
async fn api_get_game(state: SharedState, session: Session) -> HttpResponse {
    with_game(&state, &session, |_| Ok(None))
}

#[post("/api/game/players")]
async fn api_add_player(
    state: SharedState,
    session: Session,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    with_game(&state, &session, |game| {
        let weight = body.weight.value()?;
        add_player(game, &body.name, body.image_url.as_deref(), weight).map(Some)
    })
}

/// Bulk-add players from a CSV body (`name,image_url,weight`). All rows or none.
#[post("/api/game/players/import")]
async fn api_import_players(state: SharedState, session: Session, body: String) -> HttpResponse {
    with_game(&state, &session, |game| {
        let records = read_records(body.as_bytes()).map_err(|e| GameError::InvalidRecord {
            line: e.position().map(|p| p.line()).unwrap_or_default(),
            message: e.to_string(),
        })?;
        import_players(game, records).map(Some)
    })
}

#[delete("/api/game/players/{player_id}")]
async fn api_remove_player(
    state: SharedState,
    session: Session,
    path: Path<PlayerPath>,
) -> HttpResponse {
    with_game(&state, &session, |game| {
        remove_player(game, &path.player_id)?;
        Ok(None)
    })
}

/// Drag-and-drop release: move a player onto the pool or a team.
#[put("/api/game/players/{player_id}/location")]
async fn api_move_player(
    state: SharedState,
    session: Session,
    path: Path<PlayerPath>,
    body: Json<MovePlayerBody>,
) -> HttpResponse {
    with_game(&state, &session, |game| {
        let destination: Location = body
            .destination
            .parse()
            .map_err(GameError::UnknownLocation)?;
        move_player(game, &path.player_id, destination)?;
        Ok(None)
    })
}

#[put("/api/game/teams/{team_id}/captain")]
async fn api_select_captain(
    state: SharedState,
    session: Session,
    path: Path<TeamPath>,
    body: Json<SelectCaptainBody>,
) -> HttpResponse {
    with_game(&state, &session, |game| {
        let team: TeamId = path.team_id.parse().map_err(GameError::UnknownTeam)?;
        select_captain(game, &body.player_id, team)?;
        Ok(None)
    })
}

#[put("/api/game/formation")]
async fn api_set_formation(
    state: SharedState,
    session: Session,
    body: Json<FormationBody>,
) -> HttpResponse {
    with_game(&state, &session, |game| {
        set_team_formation_complete(game, body.complete)?;
        Ok(None)
    })
}

#[post("/api/game/advance")]
async fn api_advance(state: SharedState, session: Session) -> HttpResponse {
    with_game(&state, &session, |game| {
        advance(game)?;
        Ok(None)
    })
}

#[put("/api/game/step")]
async fn api_set_step(state: SharedState, session: Session, body: Json<StepBody>) -> HttpResponse {
    with_game(&state, &session, |game| {
        set_step(game, body.step)?;
        Ok(None)
    })
}

#[post("/api/game/reset")]
async fn api_reset(state: SharedState, session: Session, body: Json<StepBody>) -> HttpResponse {
    with_game(&state, &session, |game| {
        reset_to_step(game, body.step)?;
        Ok(None)
    })
}

#[put("/api/game/toss/call")]
async fn api_toss_call(
    state: SharedState,
    session: Session,
    body: Json<TossCallBody>,
) -> HttpResponse {
    with_game(&state, &session, |game| {
        set_captain_choice(game, body.team_id, body.face)?;
        Ok(None)
    })
}

#[post("/api/game/toss")]
async fn api_toss(state: SharedState, session: Session) -> HttpResponse {
    with_game(&state, &session, |game| {
        let result = perform_toss(game)?;
        let description = match game.toss_winning_team() {
            Some(team) => format!("It's {}! {} won the toss", result, team.name),
            None => format!("It's {}!", result),
        };
        Ok(Some(Notice::new("Toss Complete", description)))
    })
}

/// Register all API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_new_game)
        .service(api_get_game)
        .service(api_import_players)
        .service(api_add_player)
        .service(api_remove_player)
        .service(api_move_player)
        .service(api_select_captain)
        .service(api_set_formation)
        .service(api_advance)
        .service(api_set_step)
        .service(api_reset)
        .service(api_toss_call)
        .service(api_toss);
}
