use crate::{
    dtos::{
        location::{LocationDetailResponse, LocationResponse},
        signup::SignupResponse,
        workout::WorkoutResponse,
    },
    error::ApiResult,
    routes::{add_days, today},
    extract::AppPath,
    state::AppState,
};
use axum::{Json, extract::State};
use database::{
    error::ServiceError,
    services::{location::LocationService, signup::SignupService, workout::WorkoutService},
};
use uuid::Uuid;

/// Days of signups shown with a location
const DETAIL_DAYS: i64 = 28;

/// List the active locations
#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = 200, description = "Active locations ordered by name", body = [LocationResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Locations"
)]
pub async fn list_locations(State(state): State<AppState>) -> ApiResult<Json<Vec<LocationResponse>>> {
    let locations = LocationService::list(&state.db, true).await?;
    Ok(Json(locations.into_iter().map(LocationResponse::from).collect()))
}

/// Get a location with its workouts and the next four weeks of signups
#[utoipa::path(
    get,
    path = "/api/locations/{id}",
    params(
        ("id" = Uuid, Path, description = "Location ID")
    ),
    responses(
        (status = 200, description = "Location found", body = LocationDetailResponse),
        (status = 404, description = "Location not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Locations"
)]
pub async fn get_location(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<Json<LocationDetailResponse>> {
    let location = LocationService::get(&state.db, id)
        .await?
        .ok_or(ServiceError::NotFound("Location"))?;

    let workouts = WorkoutService::by_location(&state.db, id, true)
        .await?
        .iter()
        .map(|workout| WorkoutResponse::new(workout, &location))
        .collect();

    let today = today();
    let signups = SignupService::details_in_range(&state.db, today, add_days(today, DETAIL_DAYS)?)
        .await?
        .into_iter()
        .filter(|details| details.location.id == id)
        .map(SignupResponse::from)
        .collect();

    Ok(Json(LocationDetailResponse {
        location: location.into(),
        workouts,
        signups,
    }))
}
