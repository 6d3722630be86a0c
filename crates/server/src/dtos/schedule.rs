use chrono::{NaiveDate, NaiveTime};
use database::{entities::signups, services::workout::ScheduledWorkout};
use models::{
    days::DayOfWeek,
    schedule::{Occurrence, Slot},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct WeekQuery {
    /// Weeks from the current one, negative for past weeks
    #[serde(default)]
    pub offset: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RangeQuery {
    /// First day, `YYYY-MM-DD`
    pub start: NaiveDate,
    /// Last day, `YYYY-MM-DD`
    pub end: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationSummary {
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

/// The Q holding a slot
#[derive(Debug, Serialize, ToSchema)]
pub struct ClaimSummary {
    pub signup_id: Uuid,
    pub q_name: String,
    pub notes: Option<String>,
}

/// One dated occurrence of a workout, and who is leading it if anyone
#[derive(Debug, Serialize, ToSchema)]
pub struct SlotResponse {
    pub workout_id: Uuid,
    pub date: NaiveDate,
    /// 0 for Sunday through 6 for Saturday
    pub day_of_week: i32,
    pub day_name: String,
    /// `HH:MM`
    pub time: String,
    pub workout_type: String,
    pub location: LocationSummary,
    pub signup: Option<ClaimSummary>,
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

impl SlotResponse {
    pub fn new(
        occurrence: Occurrence<'_, ScheduledWorkout>,
        signup: Option<&signups::Model>,
    ) -> Self {
        let ScheduledWorkout { workout, location } = occurrence.workout;

        Self {
            workout_id: workout.id,
            date: occurrence.date,
            day_of_week: workout.day_of_week.number(),
            day_name: workout.day_of_week.name().to_string(),
            time: format_time(workout.time),
            workout_type: workout.workout_type.clone(),
            location: LocationSummary {
                id: location.id,
                name: location.name.clone(),
                address: location.address.clone(),
            },
            signup: signup.map(|s| ClaimSummary {
                signup_id: s.id,
                q_name: s.q_name.clone(),
                notes: s.notes.clone(),
            }),
        }
    }
}

impl From<Slot<'_, ScheduledWorkout, signups::Model>> for SlotResponse {
    fn from(slot: Slot<'_, ScheduledWorkout, signups::Model>) -> Self {
        Self::new(slot.occurrence, slot.signup)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DayResponse {
    pub date: NaiveDate,
    pub day_name: String,
    pub slots: Vec<SlotResponse>,
}

impl DayResponse {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            day_name: DayOfWeek::from_date(date).name().to_string(),
            slots: Vec::new(),
        }
    }
}

/// A Monday to Sunday week of the schedule
#[derive(Debug, Serialize, ToSchema)]
pub struct WeekResponse {
    pub offset: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub today: NaiveDate,
    pub region_name: String,
    /// How many days ahead Qs may sign up
    pub signup_window_days: u32,
    pub days: Vec<DayResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub slots: Vec<SlotResponse>,
}
