//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. See `cricket_match_web::config` for the environment
//! variables that override it.

use actix_files::Files;
use actix_web::{
    cookie::Key,
    get,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use cricket_match_web::{api, default_players, load_players_file, AppConfig, Player};

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// Roster for new games: the CSV from config if it loads, otherwise the built-in players.
fn load_seed(config: &AppConfig) -> Vec<Player> {
    let Some(path) = &config.seed_csv else {
        log::info!("Using built-in roster");
        return default_players();
    };
    match load_players_file(path) {
        Ok(players) => {
            log::info!("Loaded {} seed players from {}", players.len(), path.display());
            players
        }
        Err(e) => {
            log::warn!("{} ({}); using built-in roster", e, path.display());
            default_players()
        }
    }
}

fn session_key(config: &AppConfig) -> Key {
    match config.session_key.as_deref().map(Key::try_from) {
        Some(Ok(key)) => key,
        Some(Err(e)) => {
            log::warn!("Invalid SESSION_KEY ({}); generating a random key", e);
            Key::generate()
        }
        None => Key::generate(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(api::AppState::new(load_seed(&config)));
    let key = session_key(&config);
    let cookie_secure = config.cookie_secure;

    // Background task: periodically remove games nobody has touched within the TTL
    let state_cleanup = state.clone();
    let (ttl, every) = (config.session_ttl, config.cleanup_interval);
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = state_cleanup.evict_idle(ttl);
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive game(s) (no activity for {}h)",
                    removed,
                    ttl.as_secs() / 3600
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(api::session_middleware(key.clone(), cookie_secure))
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(favicon)
            .configure(api::configure)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}
