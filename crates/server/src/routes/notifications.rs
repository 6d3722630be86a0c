use crate::{
    dtos::signup::{RecentQuery, SignupResponse, UpcomingQuery},
    error::{ApiError, ApiResult},
    routes::{add_days, today},
    extract::AppQuery,
    state::AppState,
};
use axum::{Json, extract::State};
use chrono::{TimeDelta, Utc};
use database::services::signup::SignupService;

/// List signups made in the last few hours, newest first
#[utoipa::path(
    get,
    path = "/api/notifications/recent",
    params(RecentQuery),
    responses(
        (status = 200, description = "Recent signups", body = [SignupResponse]),
        (status = 400, description = "Hours out of range"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Notifications"
)]
pub async fn recent(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RecentQuery>,
) -> ApiResult<Json<Vec<SignupResponse>>> {
    let cutoff = TimeDelta::try_hours(query.hours)
        .and_then(|hours| Utc::now().naive_utc().checked_sub_signed(hours))
        .ok_or_else(|| ApiError::validation("Hours out of range"))?;

    let signups = SignupService::created_since(&state.db, cutoff).await?;
    Ok(Json(signups.into_iter().map(SignupResponse::from).collect()))
}

/// List the signups a few days out whose Q still needs a reminder
#[utoipa::path(
    get,
    path = "/api/notifications/upcoming",
    params(UpcomingQuery),
    responses(
        (status = 200, description = "Signups with an email, not yet reminded, ordered by time", body = [SignupResponse]),
        (status = 400, description = "Days out of range"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Notifications"
)]
pub async fn upcoming(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<UpcomingQuery>,
) -> ApiResult<Json<Vec<SignupResponse>>> {
    let date = add_days(today(), query.days)?;
    let signups = SignupService::needing_reminder(&state.db, date).await?;

    Ok(Json(signups.into_iter().map(SignupResponse::from).collect()))
}
