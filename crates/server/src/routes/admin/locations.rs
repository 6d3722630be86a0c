use crate::{
    dtos::location::{CreateLocationRequest, LocationResponse, UpdateLocationRequest},
    error::ApiResult,
    extract::{AdminAccess, AppJson, AppPath},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::location::LocationService;
use uuid::Uuid;

/// List every location, active or not
#[utoipa::path(
    get,
    path = "/api/admin/locations",
    responses(
        (status = 200, description = "All locations ordered by name", body = [LocationResponse]),
        (status = 401, description = "Missing or wrong admin password")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn list(
    _admin: AdminAccess,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<LocationResponse>>> {
    let locations = LocationService::list(&state.db, false).await?;
    Ok(Json(locations.into_iter().map(LocationResponse::from).collect()))
}

/// Add a location
#[utoipa::path(
    post,
    path = "/api/admin/locations",
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Location created", body = LocationResponse),
        (status = 400, description = "Missing name or address"),
        (status = 401, description = "Missing or wrong admin password")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn create(
    _admin: AdminAccess,
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateLocationRequest>,
) -> ApiResult<(StatusCode, Json<LocationResponse>)> {
    let location = LocationService::create(&state.db, request.into()).await?;
    Ok((StatusCode::CREATED, Json(location.into())))
}

/// Change some fields of a location
#[utoipa::path(
    patch,
    path = "/api/admin/locations/{id}",
    params(("id" = Uuid, Path, description = "Location ID")),
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "Location updated", body = LocationResponse),
        (status = 400, description = "Blank name or address"),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 404, description = "Location not found")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn update(
    _admin: AdminAccess,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateLocationRequest>,
) -> ApiResult<Json<LocationResponse>> {
    let location = LocationService::update(&state.db, id, request.into()).await?;
    Ok(Json(location.into()))
}

/// Delete a location with its workouts and their signups
#[utoipa::path(
    delete,
    path = "/api/admin/locations/{id}",
    params(("id" = Uuid, Path, description = "Location ID")),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 404, description = "Location not found")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn delete(
    _admin: AdminAccess,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<StatusCode> {
    LocationService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
