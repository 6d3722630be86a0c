use chrono::Local;
use database::{
    db::{create_connection, database_url},
    services::settings::SettingsService,
    settings::Defaults,
};
use log::{error, info};
use notifier::{error::NotifyError, reminders::run_batch};
use std::process::exit;

/// Sends the day's Q reminders. Meant to run once a day from cron.
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    if let Err(err) = run().await {
        error!("{err}");
        exit(1);
    }
}

async fn run() -> Result<(), NotifyError> {
    let defaults = Defaults::from_env();
    let db = create_connection(&database_url()).await?;
    SettingsService::apply_env_overrides(&db).await?;

    let report = run_batch(&db, &defaults, Local::now().date_naive()).await?;
    info!(
        "Sent {} of {} reminder emails for {} ({} failed)",
        report.sent, report.attempted, report.date, report.failed
    );

    Ok(())
}
