pub mod location;
pub mod schedule;
pub mod settings;
pub mod signup;
pub mod workout;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::error::{ServiceError, ServiceResult};

/// Trims an optional text field, treating blank input as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims a required text field, rejecting blank input
pub(crate) fn required(value: String, field: &str) -> ServiceResult<String> {
    non_blank(Some(value)).ok_or_else(|| ServiceError::Validation(format!("{field} is required")))
}
