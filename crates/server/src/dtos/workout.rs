use crate::{dtos::schedule::format_time, error::ApiError};
use chrono::NaiveTime;
use database::{
    entities::{locations, workouts},
    services::workout::{NewWorkout, ScheduledWorkout, WorkoutPatch},
};
use models::days::DayOfWeek;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkoutResponse {
    pub id: Uuid,
    pub location_id: Uuid,
    pub location_name: String,
    /// 0 for Sunday through 6 for Saturday
    pub day_of_week: i32,
    pub day_name: String,
    /// `HH:MM`
    pub time: String,
    pub workout_type: String,
    pub active: bool,
}

impl WorkoutResponse {
    pub fn new(workout: &workouts::Model, location: &locations::Model) -> Self {
        Self {
            id: workout.id,
            location_id: location.id,
            location_name: location.name.clone(),
            day_of_week: workout.day_of_week.number(),
            day_name: workout.day_of_week.name().to_string(),
            time: format_time(workout.time),
            workout_type: workout.workout_type.clone(),
            active: workout.active,
        }
    }
}

impl From<ScheduledWorkout> for WorkoutResponse {
    fn from(scheduled: ScheduledWorkout) -> Self {
        Self::new(&scheduled.workout, &scheduled.location)
    }
}

/// A weekday given either as its number (0 = Sunday) or its name
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum DayInput {
    Number(i32),
    Name(String),
}

impl TryFrom<DayInput> for DayOfWeek {
    type Error = ApiError;

    fn try_from(input: DayInput) -> Result<Self, Self::Error> {
        let parsed = match input {
            DayInput::Number(number) => DayOfWeek::try_from(number),
            DayInput::Name(name) => name.parse(),
        };
        parsed.map_err(ApiError::validation)
    }
}

/// Parses `HH:MM` or `HH:MM:SS`
pub fn parse_time(value: &str) -> Result<NaiveTime, ApiError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| ApiError::validation(format!("Invalid time: {value}")))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWorkoutRequest {
    pub location_id: Uuid,
    pub day_of_week: DayInput,
    /// `HH:MM`
    pub time: String,
    /// Defaults to "Boot Camp"
    #[serde(default)]
    pub workout_type: Option<String>,
}

impl TryFrom<CreateWorkoutRequest> for NewWorkout {
    type Error = ApiError;

    fn try_from(request: CreateWorkoutRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            location_id: request.location_id,
            day_of_week: request.day_of_week.try_into()?,
            time: parse_time(&request.time)?,
            workout_type: request.workout_type,
        })
    }
}

/// Fields left out stay as they are
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateWorkoutRequest {
    pub location_id: Option<Uuid>,
    pub day_of_week: Option<DayInput>,
    pub time: Option<String>,
    pub workout_type: Option<String>,
    pub active: Option<bool>,
}

impl TryFrom<UpdateWorkoutRequest> for WorkoutPatch {
    type Error = ApiError;

    fn try_from(request: UpdateWorkoutRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            location_id: request.location_id,
            day_of_week: request.day_of_week.map(DayOfWeek::try_from).transpose()?,
            time: request.time.as_deref().map(parse_time).transpose()?,
            workout_type: request.workout_type,
            active: request.active,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("05:30").unwrap(),
            NaiveTime::from_hms_opt(5, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time("17:15:00").unwrap(),
            NaiveTime::from_hms_opt(17, 15, 0).unwrap()
        );
        assert!(parse_time("5:30am").is_err());
    }

    #[test]
    fn test_day_input() {
        let by_number: DayOfWeek = DayInput::Number(1).try_into().unwrap();
        let by_name: DayOfWeek = DayInput::Name("thursday".to_string()).try_into().unwrap();
        assert_eq!(by_number, DayOfWeek::Monday);
        assert_eq!(by_name, DayOfWeek::Thursday);
        assert!(DayOfWeek::try_from(DayInput::Number(7)).is_err());
    }

    #[test]
    fn test_day_input_from_json() {
        let request: CreateWorkoutRequest = serde_json::from_str(
            r#"{"location_id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "day_of_week": "Sat", "time": "07:00"}"#,
        )
        .unwrap();
        let new = NewWorkout::try_from(request).unwrap();
        assert_eq!(new.day_of_week, DayOfWeek::Saturday);
        assert_eq!(new.workout_type, None);
    }

    #[test]
    fn test_partial_update() {
        let patch = WorkoutPatch::try_from(
            serde_json::from_str::<UpdateWorkoutRequest>(r#"{"day_of_week": 4, "active": false}"#)
                .unwrap(),
        )
        .unwrap();
        assert_eq!(patch.day_of_week, Some(DayOfWeek::Thursday));
        assert_eq!(patch.active, Some(false));
        assert_eq!(patch.time, None);

        let untouched = WorkoutPatch::try_from(
            serde_json::from_str::<UpdateWorkoutRequest>("{}").unwrap(),
        )
        .unwrap();
        assert_eq!(untouched.day_of_week, None);
        assert_eq!(untouched.location_id, None);
    }
}
