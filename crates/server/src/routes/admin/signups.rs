use crate::{
    dtos::{
        OptionalRangeQuery,
        signup::{SignupResponse, UpdateSignupRequest},
    },
    error::ApiResult,
    extract::{AdminAccess, AppJson, AppPath, AppQuery},
    routes::{add_days, admin::DEFAULT_COVERAGE_DAYS, check_range, today},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::{error::ServiceError, services::signup::SignupService};
use uuid::Uuid;

/// List signups between two dates, the next four weeks by default
#[utoipa::path(
    get,
    path = "/api/admin/signups",
    params(OptionalRangeQuery),
    responses(
        (status = 200, description = "Signups ordered by date and time", body = [SignupResponse]),
        (status = 400, description = "Invalid or too long date range"),
        (status = 401, description = "Missing or wrong admin password")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn list(
    _admin: AdminAccess,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<OptionalRangeQuery>,
) -> ApiResult<Json<Vec<SignupResponse>>> {
    let start = query.start.unwrap_or_else(today);
    let end = match query.end {
        Some(end) => end,
        None => add_days(start, DEFAULT_COVERAGE_DAYS)?,
    };
    check_range(start, end)?;

    let signups = SignupService::details_in_range(&state.db, start, end).await?;
    Ok(Json(signups.into_iter().map(SignupResponse::from).collect()))
}

/// Edit a signup
#[utoipa::path(
    patch,
    path = "/api/admin/signups/{id}",
    params(("id" = Uuid, Path, description = "Signup ID")),
    request_body = UpdateSignupRequest,
    responses(
        (status = 200, description = "Signup updated", body = SignupResponse),
        (status = 400, description = "Blank name"),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 404, description = "Signup not found")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn update(
    _admin: AdminAccess,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateSignupRequest>,
) -> ApiResult<Json<SignupResponse>> {
    SignupService::update(&state.db, id, request.into()).await?;
    let details = SignupService::get_details(&state.db, id)
        .await?
        .ok_or(ServiceError::NotFound("Signup"))?;

    Ok(Json(details.into()))
}

/// Delete a signup, freeing its slot
#[utoipa::path(
    delete,
    path = "/api/admin/signups/{id}",
    params(("id" = Uuid, Path, description = "Signup ID")),
    responses(
        (status = 204, description = "Signup deleted"),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 404, description = "Signup not found")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn delete(
    _admin: AdminAccess,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<StatusCode> {
    SignupService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
