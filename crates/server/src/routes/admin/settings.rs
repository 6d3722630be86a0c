use crate::{
    dtos::admin::{MASK, SettingResponse},
    error::{ApiError, ApiResult},
    extract::{AdminAccess, AppJson},
    state::AppState,
};
use axum::{Json, extract::State};
use database::{services::settings::SettingsService, settings::SettingKey};
use std::collections::HashMap;

async fn resolved(state: &AppState) -> ApiResult<Vec<SettingResponse>> {
    let settings = SettingsService::list(&state.db, &state.defaults).await?;
    Ok(settings.into_iter().map(SettingResponse::from).collect())
}

/// List every setting with the value in effect. Secrets are masked.
#[utoipa::path(
    get,
    path = "/api/admin/settings",
    responses(
        (status = 200, description = "All recognized settings", body = [SettingResponse]),
        (status = 401, description = "Missing or wrong admin password")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn list(
    _admin: AdminAccess,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SettingResponse>>> {
    Ok(Json(resolved(&state).await?))
}

/// Store new values for some settings.
///
/// The body maps setting keys to values. A secret sent back as its mask is
/// left unchanged. Nothing is stored if any key or value is rejected.
#[utoipa::path(
    put,
    path = "/api/admin/settings",
    request_body = HashMap<String, String>,
    responses(
        (status = 200, description = "Settings after the update", body = [SettingResponse]),
        (status = 400, description = "Unknown key or invalid value"),
        (status = 401, description = "Missing or wrong admin password")
    ),
    security(("admin_password" = [])),
    tag = "Admin"
)]
pub async fn update(
    _admin: AdminAccess,
    State(state): State<AppState>,
    AppJson(values): AppJson<HashMap<String, String>>,
) -> ApiResult<Json<Vec<SettingResponse>>> {
    let mut changes = Vec::with_capacity(values.len());
    for (key, value) in values {
        let key: SettingKey = key.parse().map_err(ApiError::validation)?;
        if key.is_secret() && value == MASK {
            continue;
        }
        changes.push((key, value));
    }

    SettingsService::update_many(&state.db, changes).await?;

    Ok(Json(resolved(&state).await?))
}
