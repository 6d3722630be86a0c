use crate::{
    dtos::workout::{CreateWorkoutRequest, UpdateWorkoutRequest, WorkoutResponse},
    error::ApiResult,
    extract::{AdminAccess, AppJson, AppPath},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::{
    error::ServiceError,
    services::workout::{NewWorkout, WorkoutPatch, WorkoutService},
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

async fn load(db: &DatabaseConnection, id: Uuid) -> ApiResult<WorkoutResponse> {
    let scheduled = WorkoutService::get(db, id)
        .await?
        .ok_or(ServiceError::NotFound("Workout"))?;
    Ok(scheduled.into())
}

/// List every workout, active or not
#[utoipa::path(
    get,
    path = "/api/admin/workouts",
    responses(
        (status = 200, description = "All workouts ordered by location, day and time", body = [WorkoutResponse]),
        (status = 401, description = "Missing or wrong admin password")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn list(
    _admin: AdminAccess,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<WorkoutResponse>>> {
    let workouts = WorkoutService::list(&state.db, false).await?;
    Ok(Json(workouts.into_iter().map(WorkoutResponse::from).collect()))
}

/// Add a weekly workout at a location
#[utoipa::path(
    post,
    path = "/api/admin/workouts",
    request_body = CreateWorkoutRequest,
    responses(
        (status = 201, description = "Workout created", body = WorkoutResponse),
        (status = 400, description = "Invalid day or time"),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 404, description = "Location not found")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn create(
    _admin: AdminAccess,
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateWorkoutRequest>,
) -> ApiResult<(StatusCode, Json<WorkoutResponse>)> {
    let new = NewWorkout::try_from(request)?;
    let workout = WorkoutService::create(&state.db, new).await?;

    Ok((StatusCode::CREATED, Json(load(&state.db, workout.id).await?)))
}

/// Change some fields of a workout
#[utoipa::path(
    patch,
    path = "/api/admin/workouts/{id}",
    params(("id" = Uuid, Path, description = "Workout ID")),
    request_body = UpdateWorkoutRequest,
    responses(
        (status = 200, description = "Workout updated", body = WorkoutResponse),
        (status = 400, description = "Invalid day, time or type"),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 404, description = "Workout or location not found")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn update(
    _admin: AdminAccess,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateWorkoutRequest>,
) -> ApiResult<Json<WorkoutResponse>> {
    let patch = WorkoutPatch::try_from(request)?;
    WorkoutService::update(&state.db, id, patch).await?;

    Ok(Json(load(&state.db, id).await?))
}

/// Delete a workout with its signups
#[utoipa::path(
    delete,
    path = "/api/admin/workouts/{id}",
    params(("id" = Uuid, Path, description = "Workout ID")),
    responses(
        (status = 204, description = "Workout deleted"),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 404, description = "Workout not found")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn delete(
    _admin: AdminAccess,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<StatusCode> {
    WorkoutService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
