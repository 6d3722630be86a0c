use crate::dtos::{explicit_null, signup::SignupResponse, workout::WorkoutResponse};
use chrono::NaiveDateTime;
use database::{
    entities::locations,
    services::location::{LocationPatch, NewLocation},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub region: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

impl From<locations::Model> for LocationResponse {
    fn from(location: locations::Model) -> Self {
        Self {
            id: location.id,
            name: location.name,
            address: location.address,
            region: location.region,
            latitude: location.latitude,
            longitude: location.longitude,
            active: location.active,
            created_at: location.created_at,
        }
    }
}

/// A location with its weekly workouts and the signups of the next four weeks
#[derive(Debug, Serialize, ToSchema)]
pub struct LocationDetailResponse {
    pub location: LocationResponse,
    pub workouts: Vec<WorkoutResponse>,
    pub signups: Vec<SignupResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLocationRequest {
    pub name: String,
    pub address: String,
    /// Defaults to "Cherokee"
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl From<CreateLocationRequest> for NewLocation {
    fn from(request: CreateLocationRequest) -> Self {
        Self {
            name: request.name,
            address: request.address,
            region: request.region,
            latitude: request.latitude,
            longitude: request.longitude,
        }
    }
}

/// Fields left out stay as they are. A `null` coordinate clears it.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub region: Option<String>,
    #[serde(deserialize_with = "explicit_null")]
    #[schema(value_type = Option<f64>)]
    pub latitude: Option<Option<f64>>,
    #[serde(deserialize_with = "explicit_null")]
    #[schema(value_type = Option<f64>)]
    pub longitude: Option<Option<f64>>,
    pub active: Option<bool>,
}

impl From<UpdateLocationRequest> for LocationPatch {
    fn from(request: UpdateLocationRequest) -> Self {
        Self {
            name: request.name,
            address: request.address,
            region: request.region,
            latitude: request.latitude,
            longitude: request.longitude,
            active: request.active,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_update_tells_null_from_missing() {
        let request: UpdateLocationRequest =
            serde_json::from_str(r#"{"latitude": null, "longitude": -84.5}"#).unwrap();
        let patch = LocationPatch::from(request);

        assert_eq!(patch.latitude, Some(None));
        assert_eq!(patch.longitude, Some(Some(-84.5)));

        let patch = LocationPatch::from(
            serde_json::from_str::<UpdateLocationRequest>(r#"{"name": "Apex"}"#).unwrap(),
        );
        assert_eq!(patch.latitude, None);
        assert_eq!(patch.longitude, None);
    }
}
