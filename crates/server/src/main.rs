mod app;
mod doc;
mod dtos;
mod error;
mod extract;
mod routes;
mod state;
mod utils;


use crate::{app::app, state::AppState, utils::shutdown::shutdown_signal};
use database::{
    db::{create_connection, database_url},
    services::settings::SettingsService,
    settings::Defaults,
};
use log::{error, info};
use std::{env, error::Error, process::exit};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "3000";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    if let Err(err) = run().await {
        error!("{err}");
        exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let defaults = Defaults::from_env();
    let db = create_connection(&database_url()).await?;

    let applied = SettingsService::apply_env_overrides(&db).await?;
    if applied > 0 {
        info!("Stored {applied} settings from the environment");
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Running axum on http://{addr}, docs at /docs");

    axum::serve(listener, app(AppState::new(db, defaults)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
