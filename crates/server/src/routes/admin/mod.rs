//! Management endpoints. Every handler takes [`AdminAccess`], so a request
//! without the current admin password never reaches it.
//!
//! [`AdminAccess`]: crate::extract::AdminAccess

pub mod locations;
pub mod settings;
pub mod signups;
pub mod workouts;

use crate::{
    dtos::{OptionalRangeQuery, admin::DashboardResponse, signup::SignupResponse},
    error::ApiResult,
    extract::{AdminAccess, AppQuery},
    routes::{add_days, check_range, today},
    state::AppState,
};
use axum::{Json, extract::State};
use database::services::{schedule::ScheduleService, signup::SignupService};

/// Days of coverage reported when no end is given
pub const DEFAULT_COVERAGE_DAYS: i64 = 28;
/// Days of signups listed as upcoming
pub const UPCOMING_DAYS: i64 = 7;

/// Get coverage statistics and the coming week's signups
#[utoipa::path(
    get,
    path = "/api/admin/coverage",
    params(OptionalRangeQuery),
    responses(
        (status = 200, description = "Coverage over the range, today to four weeks out by default", body = DashboardResponse),
        (status = 400, description = "Invalid or too long date range"),
        (status = 401, description = "Missing or wrong admin password"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("admin_password" = [])
    ),
    tag = "Admin"
)]
pub async fn coverage(
    _admin: AdminAccess,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<OptionalRangeQuery>,
) -> ApiResult<Json<DashboardResponse>> {
    let today = today();
    let start = query.start.unwrap_or(today);
    let end = match query.end {
        Some(end) => end,
        None => add_days(start, DEFAULT_COVERAGE_DAYS)?,
    };
    check_range(start, end)?;

    let stats = ScheduleService::coverage(&state.db, start, end).await?;
    let upcoming = SignupService::details_in_range(&state.db, today, add_days(today, UPCOMING_DAYS)?)
        .await?
        .into_iter()
        .map(SignupResponse::from)
        .collect();

    Ok(Json(DashboardResponse {
        start,
        end,
        stats: stats.into(),
        upcoming,
    }))
}
