use log::info;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite://qsheet.db?mode=rwc";

/// Reads the database URL from the environment or `.env`
pub fn database_url() -> String {
    dotenvy::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Creates a database connection and brings the schema up to date
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect(ConnectOptions::new(database_url)).await
}

/// Opens a private in-memory SQLite database with the schema applied.
///
/// The pool is limited to one connection because every SQLite memory
/// connection is a separate database.
pub async fn connect_in_memory() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    connect(options).await
}

async fn connect(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    info!("Database schema is up to date");

    Ok(db)
}
