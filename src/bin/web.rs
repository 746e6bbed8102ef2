//! Single binary web server: JSON API for running a cup.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST, PORT, INACTIVITY_TIMEOUT_HOURS, CLEANUP_INTERVAL_MINUTES.

use actix_web::{App, HttpServer};
use cup_tournament_web::api::{configure, new_state, purge_inactive};
use cup_tournament_web::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = new_state();

    // Background task: periodically remove tournaments nobody has touched for a while
    let state_cleanup = state.clone();
    let (timeout, every) = (config.inactivity_timeout, config.cleanup_interval);
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = purge_inactive(&state_cleanup, timeout);
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for {}h)",
                    removed,
                    timeout.as_secs() / 3600
                );
            }
        }
    });

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
