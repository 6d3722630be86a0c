pub mod admin;
pub mod location;
pub mod schedule;
pub mod signup;
pub mod workout;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use utoipa::IntoParams;

/// Tells an explicit `null` apart from a missing field: missing stays `None`
/// through `#[serde(default)]`, `null` becomes `Some(None)`
pub fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// An inclusive date range where either end may be left to a default
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct OptionalRangeQuery {
    /// First day, `YYYY-MM-DD`
    pub start: Option<NaiveDate>,
    /// Last day, `YYYY-MM-DD`
    pub end: Option<NaiveDate>,
}
