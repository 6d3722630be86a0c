use crate::{error::ApiError, state::AppState};
use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use database::{error::ServiceError, services::settings::SettingsService};

/// `axum::Json` whose rejection is an [`ApiError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` whose rejection is an [`ApiError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

/// `axum::extract::Path` whose rejection is an [`ApiError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// Header carrying the admin password
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Proof that the request carried the current admin password.
///
/// The password is checked against the settings store on every request, so
/// a change takes effect immediately.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

impl FromRequestParts<AppState> for AdminAccess {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let candidate = parts
            .headers
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(ServiceError::Unauthorized)?;

        if SettingsService::check_admin_password(&state.db, &state.defaults, candidate).await? {
            Ok(Self)
        } else {
            Err(ServiceError::Unauthorized.into())
        }
    }
}
