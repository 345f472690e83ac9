mod config;
mod credentials;
mod db;
mod error;
mod services;
mod session;
mod state;
mod storage;
#[cfg(test)]
mod test_support;

use crate::config::Config;
use crate::state::AppState;
use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::fs;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(io::Error::other)?;
    let state = AppState::from_config(&config).map_err(io::Error::other)?;

    // Storage directories and schema must exist before the first request.
    fs::create_dir_all(&state.upload_dir)?;
    fs::create_dir_all(&state.exercise_image_dir)?;
    state.db.init_schema().map_err(io::Error::other)?;
    info!("Using database {}", state.db.path().display());

    let state = web::Data::new(state);
    info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(session::resolve_session))
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(services::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
