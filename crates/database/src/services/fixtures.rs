//! Seed data shared by the service tests

use crate::{
    entities::{locations, signups, workouts},
    services::{
        location::{LocationService, NewLocation},
        signup::{NewSignup, SignupService},
        workout::{NewWorkout, WorkoutService},
    },
};
use chrono::{NaiveDate, NaiveTime};
use models::days::DayOfWeek;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

/// 2024-01-01, a Monday
pub fn monday() -> NaiveDate {
    date("2024-01-01")
}

pub async fn seed_location(db: &DatabaseConnection, name: &str) -> locations::Model {
    LocationService::create(
        db,
        NewLocation {
            name: name.to_string(),
            address: format!("{name} Park, Woodstock, GA"),
            region: None,
            latitude: None,
            longitude: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_workout(
    db: &DatabaseConnection,
    location_id: Uuid,
    day_of_week: DayOfWeek,
    at: &str,
) -> workouts::Model {
    WorkoutService::create(
        db,
        NewWorkout {
            location_id,
            day_of_week,
            time: time(at),
            workout_type: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_signup(
    db: &DatabaseConnection,
    workout_id: Uuid,
    on: NaiveDate,
    q_name: &str,
) -> signups::Model {
    let id = SignupService::create_signup(
        db,
        NewSignup {
            workout_id,
            date: on,
            q_name: q_name.to_string(),
            q_email: Some(format!("{}@example.com", q_name.to_lowercase())),
            notes: None,
        },
    )
    .await
    .unwrap();

    signups::Entity::find_by_id(id)
        .one(db)
        .await
        .unwrap()
        .unwrap()
}
