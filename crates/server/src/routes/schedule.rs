use crate::{
    dtos::schedule::{DayResponse, RangeQuery, ScheduleResponse, SlotResponse, WeekQuery, WeekResponse},
    error::{ApiError, ApiResult},
    routes::{check_range, today},
    extract::AppQuery,
    state::AppState,
};
use axum::{Json, extract::State};
use database::{
    services::{schedule::ScheduleWindow, settings::SettingsService},
    settings::SettingKey,
};
use models::schedule::week_bounds;

/// Get one Monday to Sunday week of the schedule
#[utoipa::path(
    get,
    path = "/api/schedule/week",
    params(WeekQuery),
    responses(
        (status = 200, description = "Every active workout of the week with its Q, if any", body = WeekResponse),
        (status = 400, description = "Week offset out of range"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedule"
)]
pub async fn get_week(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<WeekQuery>,
) -> ApiResult<Json<WeekResponse>> {
    let today = today();
    let (start, end) = week_bounds(today, query.offset)
        .ok_or_else(|| ApiError::validation("Week offset out of range"))?;

    let window = ScheduleWindow::load(&state.db, start, end).await?;
    let mut days: Vec<DayResponse> = start.iter_days().take(7).map(DayResponse::new).collect();
    for slot in window.slots() {
        if let Some(day) = days.iter_mut().find(|day| day.date == slot.occurrence.date) {
            day.slots.push(slot.into());
        }
    }

    Ok(Json(WeekResponse {
        offset: query.offset,
        start,
        end,
        today,
        region_name: SettingsService::resolve(&state.db, &state.defaults, SettingKey::RegionName)
            .await?,
        signup_window_days: SettingsService::resolve_parsed(
            &state.db,
            &state.defaults,
            SettingKey::SignupWindowDays,
        )
        .await?,
        days,
    }))
}

/// Get every slot between two dates
#[utoipa::path(
    get,
    path = "/api/schedule",
    params(RangeQuery),
    responses(
        (status = 200, description = "Slots ordered by date, then time", body = ScheduleResponse),
        (status = 400, description = "Invalid or too long date range"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedule"
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> ApiResult<Json<ScheduleResponse>> {
    check_range(query.start, query.end)?;

    let window = ScheduleWindow::load(&state.db, query.start, query.end).await?;
    let slots = window.slots().into_iter().map(SlotResponse::from).collect();

    Ok(Json(ScheduleResponse {
        start: query.start,
        end: query.end,
        slots,
    }))
}

/// Get the slots between two dates that still need a Q
#[utoipa::path(
    get,
    path = "/api/slots/empty",
    params(RangeQuery),
    responses(
        (status = 200, description = "Uncovered slots ordered by date, then time", body = ScheduleResponse),
        (status = 400, description = "Invalid or too long date range"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedule"
)]
pub async fn get_empty_slots(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> ApiResult<Json<ScheduleResponse>> {
    check_range(query.start, query.end)?;

    let window = ScheduleWindow::load(&state.db, query.start, query.end).await?;
    let slots = window
        .empty_slots()
        .into_iter()
        .map(|occurrence| SlotResponse::new(occurrence, None))
        .collect();

    Ok(Json(ScheduleResponse {
        start: query.start,
        end: query.end,
        slots,
    }))
}
