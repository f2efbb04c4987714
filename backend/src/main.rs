mod config;
mod services;
mod state;
mod storage;

use crate::config::Config;
use crate::state::AppState;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::from_env();
    let state = AppState::new(&config);

    match state.db.connect() {
        Ok(_) => info!("Using database {}", state.db.path().display()),
        Err(e) => warn!("Database {} not usable yet: {}", state.db.path().display(), e),
    }
    info!("Server running at {}", config.url());

    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
