use crate::dtos::schedule::format_time;
use chrono::{NaiveDate, NaiveDateTime};
use database::services::signup::{SignupDetails, SignupPatch};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub workout_id: Uuid,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub q_name: String,
    #[serde(default)]
    pub q_email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// The shared sign-up password
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupCreated {
    pub success: bool,
    pub signup_id: Uuid,
    pub message: String,
}

/// A signup with the workout and location it claims
#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub date: NaiveDate,
    pub q_name: String,
    pub q_email: Option<String>,
    pub notes: Option<String>,
    pub reminded: bool,
    pub created_at: NaiveDateTime,
    pub day_of_week: i32,
    pub day_name: String,
    pub time: String,
    pub workout_type: String,
    pub location_id: Uuid,
    pub location_name: String,
    pub address: String,
}

impl From<SignupDetails> for SignupResponse {
    fn from(details: SignupDetails) -> Self {
        let SignupDetails {
            signup,
            workout,
            location,
        } = details;

        Self {
            id: signup.id,
            workout_id: signup.workout_id,
            date: signup.date,
            q_name: signup.q_name,
            q_email: signup.q_email,
            notes: signup.notes,
            reminded: signup.reminded,
            created_at: signup.created_at,
            day_of_week: workout.day_of_week.number(),
            day_name: workout.day_of_week.name().to_string(),
            time: format_time(workout.time),
            workout_type: workout.workout_type,
            location_id: location.id,
            location_name: location.name,
            address: location.address,
        }
    }
}

/// Fields left out stay as they are. A blank email or notes clears it.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateSignupRequest {
    pub q_name: Option<String>,
    pub q_email: Option<String>,
    pub notes: Option<String>,
    pub reminded: Option<bool>,
}

impl From<UpdateSignupRequest> for SignupPatch {
    fn from(request: UpdateSignupRequest) -> Self {
        Self {
            q_name: request.q_name,
            q_email: request.q_email,
            notes: request.notes,
            reminded: request.reminded,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentQuery {
    /// How far back to look, in hours
    #[serde(default = "default_hours")]
    pub hours: i64,
}

fn default_hours() -> i64 {
    24
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct UpcomingQuery {
    /// Days from today of the workouts to list
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    2
}
