use crate::{
    extract::ADMIN_PASSWORD_HEADER,
    routes::{admin, health, locations, notifications, root, schedule, signup},
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "admin_password",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(ADMIN_PASSWORD_HEADER))),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        schedule::get_week,
        schedule::get_schedule,
        schedule::get_empty_slots,
        locations::list_locations,
        locations::get_location,
        signup::create_signup,
        notifications::recent,
        notifications::upcoming,
        admin::coverage,
        admin::locations::list,
        admin::locations::create,
        admin::locations::update,
        admin::locations::delete,
        admin::workouts::list,
        admin::workouts::create,
        admin::workouts::update,
        admin::workouts::delete,
        admin::signups::list,
        admin::signups::update,
        admin::signups::delete,
        admin::settings::list,
        admin::settings::update
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness checks"),
        (name = "Schedule", description = "Weekly workouts projected onto dates"),
        (name = "Locations", description = "Workout sites"),
        (name = "Signups", description = "Claiming a slot to Q"),
        (name = "Notifications", description = "Feeds for notification consumers"),
        (name = "Admin", description = "Management endpoints, authenticated by the x-admin-password header"),
    ),
    info(
        title = "Q-Sheet API",
        version = "1.0.0",
        description = "Weekly workout Q sign-up board",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
