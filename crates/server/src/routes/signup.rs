use crate::{
    dtos::signup::{SignupCreated, SignupRequest},
    error::{ApiError, ApiResult},
    extract::AppJson,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use database::{
    error::ServiceError,
    services::{
        settings::SettingsService,
        signup::{NewSignup, SignupService},
    },
};

/// Sign up to Q a workout on a date
#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Slot claimed", body = SignupCreated),
        (status = 400, description = "Missing name, bad date or wrong weekday"),
        (status = 401, description = "Invalid sign-up password"),
        (status = 404, description = "Workout not found"),
        (status = 409, description = "Slot already taken"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Signups"
)]
pub async fn create_signup(
    State(state): State<AppState>,
    AppJson(request): AppJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<SignupCreated>)> {
    if !SettingsService::check_signup_password(&state.db, &state.defaults, &request.password).await? {
        return Err(ServiceError::Unauthorized.into());
    }

    let date = NaiveDate::parse_from_str(request.date.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::validation(format!("Invalid date: {}", request.date)))?;

    let signup_id = SignupService::create_signup(
        &state.db,
        NewSignup {
            workout_id: request.workout_id,
            date,
            q_name: request.q_name,
            q_email: request.q_email,
            notes: request.notes,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupCreated {
            success: true,
            signup_id,
            message: "Q signup successful!".to_string(),
        }),
    ))
}
