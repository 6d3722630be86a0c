use database::settings::Defaults;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub defaults: Arc<Defaults>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, defaults: Defaults) -> Self {
        Self {
            db,
            defaults: Arc::new(defaults),
        }
    }
}
