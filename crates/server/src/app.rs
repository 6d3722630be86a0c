use crate::{
    doc::ApiDoc,
    routes::{admin, health, locations, notifications, root, schedule, signup},
    state::AppState,
};
use axum::{
    Router,
    routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/coverage", get(admin::coverage))
        .route(
            "/locations",
            get(admin::locations::list).post(admin::locations::create),
        )
        .route(
            "/locations/{id}",
            patch(admin::locations::update).delete(admin::locations::delete),
        )
        .route(
            "/workouts",
            get(admin::workouts::list).post(admin::workouts::create),
        )
        .route(
            "/workouts/{id}",
            patch(admin::workouts::update).delete(admin::workouts::delete),
        )
        .route("/signups", get(admin::signups::list))
        .route(
            "/signups/{id}",
            patch(admin::signups::update).delete(admin::signups::delete),
        )
        .route(
            "/settings",
            get(admin::settings::list).put(admin::settings::update),
        )
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/schedule", get(schedule::get_schedule))
        .route("/schedule/week", get(schedule::get_week))
        .route("/slots/empty", get(schedule::get_empty_slots))
        .route("/locations", get(locations::list_locations))
        .route("/locations/{id}", get(locations::get_location))
        .route("/signup", post(signup::create_signup))
        .route("/notifications/recent", get(notifications::recent))
        .route("/notifications/upcoming", get(notifications::upcoming))
        .nest("/admin", admin_routes())
}

/// Builds the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .nest("/api", api_routes())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}
