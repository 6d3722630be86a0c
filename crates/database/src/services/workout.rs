use crate::{
    entities::{locations, signups, workouts},
    error::{ServiceError, ServiceResult},
    services::{non_blank, required},
};
use chrono::{NaiveTime, Utc};
use log::info;
use models::{days::DayOfWeek, schedule::Recurrence};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::Serialize;
use uuid::Uuid;

/// Workout type assigned when none is given
pub const DEFAULT_WORKOUT_TYPE: &str = "Boot Camp";

/// A workout together with the location hosting it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledWorkout {
    pub workout: workouts::Model,
    pub location: locations::Model,
}

impl Recurrence for ScheduledWorkout {
    type Id = Uuid;

    fn workout_id(&self) -> Uuid {
        self.workout.id
    }

    fn day_of_week(&self) -> DayOfWeek {
        self.workout.day_of_week
    }

    fn time(&self) -> NaiveTime {
        self.workout.time
    }

    fn is_active(&self) -> bool {
        self.workout.active && self.location.active
    }
}

#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub location_id: Uuid,
    pub day_of_week: DayOfWeek,
    pub time: NaiveTime,
    pub workout_type: Option<String>,
}

/// The fields of a workout an admin may change. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct WorkoutPatch {
    pub location_id: Option<Uuid>,
    pub day_of_week: Option<DayOfWeek>,
    pub time: Option<NaiveTime>,
    pub workout_type: Option<String>,
    pub active: Option<bool>,
}

pub struct WorkoutService;

impl WorkoutService {
    /// All workouts with their locations, ordered by location name, day and
    /// time. With `active_only`, both the workout and its location must be
    /// active.
    pub async fn list(
        db: &DatabaseConnection,
        active_only: bool,
    ) -> Result<Vec<ScheduledWorkout>, DbErr> {
        let mut query = workouts::Entity::find().find_also_related(locations::Entity);
        if active_only {
            query = query
                .filter(workouts::Column::Active.eq(true))
                .filter(locations::Column::Active.eq(true));
        }

        let rows = query
            .order_by_asc(locations::Column::Name)
            .order_by_asc(workouts::Column::DayOfWeek)
            .order_by_asc(workouts::Column::Time)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(workout, location)| {
                location.map(|location| ScheduledWorkout { workout, location })
            })
            .collect())
    }

    /// The workouts hosted at one location, ordered by day and time
    pub async fn by_location(
        db: &DatabaseConnection,
        location_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<workouts::Model>, DbErr> {
        let mut query = workouts::Entity::find().filter(workouts::Column::LocationId.eq(location_id));
        if active_only {
            query = query.filter(workouts::Column::Active.eq(true));
        }

        query
            .order_by_asc(workouts::Column::DayOfWeek)
            .order_by_asc(workouts::Column::Time)
            .all(db)
            .await
    }

    pub async fn get(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<ScheduledWorkout>, DbErr> {
        let row = workouts::Entity::find_by_id(id)
            .find_also_related(locations::Entity)
            .one(db)
            .await?;

        Ok(row.and_then(|(workout, location)| {
            location.map(|location| ScheduledWorkout { workout, location })
        }))
    }

    pub async fn create(
        db: &DatabaseConnection,
        new: NewWorkout,
    ) -> ServiceResult<workouts::Model> {
        Self::ensure_location(db, new.location_id).await?;

        let workout = workouts::ActiveModel {
            id: Set(Uuid::new_v4()),
            location_id: Set(new.location_id),
            day_of_week: Set(new.day_of_week),
            time: Set(new.time),
            workout_type: Set(
                non_blank(new.workout_type).unwrap_or_else(|| DEFAULT_WORKOUT_TYPE.to_string())
            ),
            active: Set(true),
            created_at: Set(Utc::now().naive_utc()),
        };

        Ok(workout.insert(db).await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        patch: WorkoutPatch,
    ) -> ServiceResult<workouts::Model> {
        let workout = workouts::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("Workout"))?;
        let mut active = workout.clone().into_active_model();

        if let Some(location_id) = patch.location_id {
            Self::ensure_location(db, location_id).await?;
            active.location_id = Set(location_id);
        }
        if let Some(day_of_week) = patch.day_of_week {
            active.day_of_week = Set(day_of_week);
        }
        if let Some(time) = patch.time {
            active.time = Set(time);
        }
        if let Some(workout_type) = patch.workout_type {
            active.workout_type = Set(required(workout_type, "Workout type")?);
        }
        if let Some(is_active) = patch.active {
            active.active = Set(is_active);
        }

        if !active.is_changed() {
            return Ok(workout);
        }

        Ok(active.update(db).await?)
    }

    /// Deletes a workout together with its signups
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> ServiceResult<()> {
        let txn = db.begin().await?;

        let removed_signups = signups::Entity::delete_many()
            .filter(signups::Column::WorkoutId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let deleted = workouts::Entity::delete_by_id(id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            return Err(ServiceError::NotFound("Workout"));
        }

        txn.commit().await?;
        info!("Deleted workout {id} with {removed_signups} signups");

        Ok(())
    }

    async fn ensure_location(db: &DatabaseConnection, location_id: Uuid) -> ServiceResult<()> {
        locations::Entity::find_by_id(location_id)
            .one(db)
            .await?
            .map(|_| ())
            .ok_or(ServiceError::NotFound("Location"))
    }
}
