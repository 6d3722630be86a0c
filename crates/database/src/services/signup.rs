use crate::{
    entities::{locations, signups, workouts},
    error::{ServiceError, ServiceResult, is_unique_violation},
    services::{non_blank, required, workout::ScheduledWorkout},
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use log::info;
use models::days::DayOfWeek;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewSignup {
    pub workout_id: Uuid,
    pub date: NaiveDate,
    pub q_name: String,
    pub q_email: Option<String>,
    pub notes: Option<String>,
}

/// The fields of a signup that may change after it is made.
///
/// `None` leaves a field as is. A blank `q_email` or `notes` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupPatch {
    pub q_name: Option<String>,
    pub q_email: Option<String>,
    pub notes: Option<String>,
    pub reminded: Option<bool>,
}

/// A signup with the workout and location it claims
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupDetails {
    pub signup: signups::Model,
    pub workout: workouts::Model,
    pub location: locations::Model,
}

pub struct SignupService;

impl SignupService {
    /// Claims one dated occurrence of a workout for a Q.
    ///
    /// The claim is a single insert guarded by the unique index on
    /// `(workout_id, date)`. When two requests race for the same slot, the
    /// store rejects the second insert and it comes back as
    /// [`ServiceError::Conflict`].
    pub async fn create_signup(db: &DatabaseConnection, new: NewSignup) -> ServiceResult<Uuid> {
        let q_name = required(new.q_name, "Name")?;

        let txn = db.begin().await?;

        let workout = workouts::Entity::find_by_id(new.workout_id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("Workout"))?;

        let day = DayOfWeek::from_date(new.date);
        if day != workout.day_of_week {
            return Err(ServiceError::Validation(format!(
                "{} is a {day}, but this workout meets on {}",
                new.date, workout.day_of_week
            )));
        }

        let id = Uuid::new_v4();
        let signup = signups::ActiveModel {
            id: Set(id),
            workout_id: Set(new.workout_id),
            date: Set(new.date),
            q_name: Set(q_name),
            q_email: Set(non_blank(new.q_email)),
            notes: Set(non_blank(new.notes)),
            reminded: Set(false),
            created_at: Set(Utc::now().naive_utc()),
        };

        match signups::Entity::insert(signup)
            .exec_without_returning(&txn)
            .await
        {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => {
                return Err(ServiceError::Conflict("Slot already taken".to_string()));
            }
            Err(err) => return Err(err.into()),
        }

        txn.commit().await?;
        info!(
            "Signup {id} claimed workout {} on {}",
            new.workout_id, new.date
        );

        Ok(id)
    }

    /// Signups dated between `start` and `end`, both inclusive
    pub async fn in_range(
        db: &DatabaseConnection,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<signups::Model>, DbErr> {
        signups::Entity::find()
            .filter(signups::Column::Date.between(start, end))
            .order_by_asc(signups::Column::Date)
            .all(db)
            .await
    }

    /// Signups dated between `start` and `end`, with their workouts and
    /// locations, ordered by date and time
    pub async fn details_in_range(
        db: &DatabaseConnection,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SignupDetails>, DbErr> {
        let signups = Self::in_range(db, start, end).await?;
        let mut details = Self::attach_details(db, signups).await?;
        details.sort_by_key(|d| (d.signup.date, d.workout.time));

        Ok(details)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<Option<signups::Model>, DbErr> {
        signups::Entity::find_by_id(id).one(db).await
    }

    pub async fn get_details(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<SignupDetails>, DbErr> {
        let Some(signup) = Self::get(db, id).await? else {
            return Ok(None);
        };

        Ok(Self::attach_details(db, vec![signup]).await?.pop())
    }

    /// The signup claiming a workout on a date, if any
    pub async fn get_for_workout_date(
        db: &DatabaseConnection,
        workout_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<signups::Model>, DbErr> {
        signups::Entity::find()
            .filter(signups::Column::WorkoutId.eq(workout_id))
            .filter(signups::Column::Date.eq(date))
            .one(db)
            .await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        patch: SignupPatch,
    ) -> ServiceResult<signups::Model> {
        let signup = Self::get(db, id)
            .await?
            .ok_or(ServiceError::NotFound("Signup"))?;
        let mut active = signup.clone().into_active_model();

        if let Some(q_name) = patch.q_name {
            active.q_name = Set(required(q_name, "Name")?);
        }
        if let Some(q_email) = patch.q_email {
            active.q_email = Set(non_blank(Some(q_email)));
        }
        if let Some(notes) = patch.notes {
            active.notes = Set(non_blank(Some(notes)));
        }
        if let Some(reminded) = patch.reminded {
            active.reminded = Set(reminded);
        }

        if !active.is_changed() {
            return Ok(signup);
        }

        Ok(active.update(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> ServiceResult<()> {
        let deleted = signups::Entity::delete_by_id(id).exec(db).await?;
        if deleted.rows_affected == 0 {
            return Err(ServiceError::NotFound("Signup"));
        }

        Ok(())
    }

    /// Signups made at or after `cutoff`, newest first
    pub async fn created_since(
        db: &DatabaseConnection,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<SignupDetails>, DbErr> {
        let signups = signups::Entity::find()
            .filter(signups::Column::CreatedAt.gte(cutoff))
            .order_by_desc(signups::Column::CreatedAt)
            .all(db)
            .await?;

        Self::attach_details(db, signups).await
    }

    /// Signups on `date` whose Q left an email and has not been reminded yet,
    /// ordered by workout time
    pub async fn needing_reminder(
        db: &DatabaseConnection,
        date: NaiveDate,
    ) -> Result<Vec<SignupDetails>, DbErr> {
        let signups = signups::Entity::find()
            .filter(signups::Column::Date.eq(date))
            .filter(signups::Column::Reminded.eq(false))
            .filter(signups::Column::QEmail.is_not_null())
            .all(db)
            .await?;

        let mut details = Self::attach_details(db, signups).await?;
        details.sort_by_key(|d| d.workout.time);

        Ok(details)
    }

    pub async fn mark_reminded(db: &DatabaseConnection, id: Uuid) -> ServiceResult<()> {
        Self::update(
            db,
            id,
            SignupPatch {
                reminded: Some(true),
                ..Default::default()
            },
        )
        .await
        .map(|_| ())
    }

    /// Looks up the workout and location of each signup in one query.
    /// Order is preserved.
    async fn attach_details(
        db: &DatabaseConnection,
        signups: Vec<signups::Model>,
    ) -> Result<Vec<SignupDetails>, DbErr> {
        let workout_ids: HashSet<Uuid> = signups.iter().map(|s| s.workout_id).collect();
        if workout_ids.is_empty() {
            return Ok(Vec::new());
        }

        let workouts: HashMap<Uuid, ScheduledWorkout> = workouts::Entity::find()
            .find_also_related(locations::Entity)
            .filter(workouts::Column::Id.is_in(workout_ids))
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(workout, location)| {
                location.map(|location| (workout.id, ScheduledWorkout { workout, location }))
            })
            .collect();

        Ok(signups
            .into_iter()
            .filter_map(|signup| {
                let scheduled = workouts.get(&signup.workout_id)?;
                Some(SignupDetails {
                    signup,
                    workout: scheduled.workout.clone(),
                    location: scheduled.location.clone(),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        db::connect_in_memory,
        services::fixtures::{date, monday, seed_location, seed_signup, seed_workout},
    };
    use futures::future::join_all;

    fn new_signup(workout_id: Uuid, on: NaiveDate, q_name: &str) -> NewSignup {
        NewSignup {
            workout_id,
            date: on,
            q_name: q_name.to_string(),
            q_email: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_drops_blank_fields() {
        let db = connect_in_memory().await.unwrap();
        let apex = seed_location(&db, "Apex").await;
        let workout = seed_workout(&db, apex.id, DayOfWeek::Monday, "05:30").await;

        let id = SignupService::create_signup(
            &db,
            NewSignup {
                workout_id: workout.id,
                date: monday(),
                q_name: "  Slaw  ".to_string(),
                q_email: Some("   ".to_string()),
                notes: Some(" bring sandbags ".to_string()),
            },
        )
        .await
        .unwrap();

        let signup = SignupService::get(&db, id).await.unwrap().unwrap();
        assert_eq!(signup.q_name, "Slaw");
        assert_eq!(signup.q_email, None);
        assert_eq!(signup.notes.as_deref(), Some("bring sandbags"));
        assert!(!signup.reminded);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let db = connect_in_memory().await.unwrap();
        let apex = seed_location(&db, "Apex").await;
        let workout = seed_workout(&db, apex.id, DayOfWeek::Monday, "05:30").await;

        let result = SignupService::create_signup(&db, new_signup(workout.id, monday(), " ")).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_for_missing_workout() {
        let db = connect_in_memory().await.unwrap();
        let result =
            SignupService::create_signup(&db, new_signup(Uuid::new_v4(), monday(), "Slaw")).await;

        assert!(matches!(result, Err(ServiceError::NotFound("Workout"))));
    }

    #[tokio::test]
    async fn test_create_rejects_wrong_weekday() {
        let db = connect_in_memory().await.unwrap();
        let apex = seed_location(&db, "Apex").await;
        let workout = seed_workout(&db, apex.id, DayOfWeek::Monday, "05:30").await;

        let result =
            SignupService::create_signup(&db, new_signup(workout.id, date("2024-01-02"), "Slaw"))
                .await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_second_claim_conflicts() {
        let db = connect_in_memory().await.unwrap();
        let apex = seed_location(&db, "Apex").await;
        let workout = seed_workout(&db, apex.id, DayOfWeek::Monday, "05:30").await;

        let first = SignupService::create_signup(&db, new_signup(workout.id, monday(), "Slaw")).await;
        assert!(first.is_ok());

        let second =
            SignupService::create_signup(&db, new_signup(workout.id, monday(), "Tinder")).await;
        assert!(matches!(second, Err(ServiceError::Conflict(_))));

        let kept = SignupService::get_for_workout_date(&db, workout.id, monday())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.q_name, "Slaw");

        // The next week is still open
        let next_week =
            SignupService::create_signup(&db, new_signup(workout.id, date("2024-01-08"), "Tinder"))
                .await;
        assert!(next_week.is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_claims_yield_one_winner() {
        let db = connect_in_memory().await.unwrap();
        let apex = seed_location(&db, "Apex").await;
        let workout = seed_workout(&db, apex.id, DayOfWeek::Monday, "05:30").await;

        let attempts = ["Slaw", "Tinder", "Hoops", "Mayhem", "Gumby"]
            .into_iter()
            .map(|q| SignupService::create_signup(&db, new_signup(workout.id, monday(), q)));
        let results = join_all(attempts).await;

        let winners = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(ServiceError::Conflict(_))))
            .count();
        assert_eq!(winners, 1);
        assert_eq!(conflicts, 4);

        let stored = SignupService::in_range(&db, monday(), monday()).await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_update_patch() {
        let db = connect_in_memory().await.unwrap();
        let apex = seed_location(&db, "Apex").await;
        let workout = seed_workout(&db, apex.id, DayOfWeek::Monday, "05:30").await;
        let signup = seed_signup(&db, workout.id, monday(), "Slaw").await;
        assert!(signup.q_email.is_some());

        let updated = SignupService::update(
            &db,
            signup.id,
            SignupPatch {
                q_email: Some(String::new()),
                notes: Some("EC at 5:00".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.q_name, "Slaw");
        assert_eq!(updated.q_email, None);
        assert_eq!(updated.notes.as_deref(), Some("EC at 5:00"));

        let blank_name = SignupService::update(
            &db,
            signup.id,
            SignupPatch {
                q_name: Some("\t".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(blank_name, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_frees_the_slot() {
        let db = connect_in_memory().await.unwrap();
        let apex = seed_location(&db, "Apex").await;
        let workout = seed_workout(&db, apex.id, DayOfWeek::Monday, "05:30").await;
        let signup = seed_signup(&db, workout.id, monday(), "Slaw").await;

        SignupService::delete(&db, signup.id).await.unwrap();
        assert!(matches!(
            SignupService::delete(&db, signup.id).await,
            Err(ServiceError::NotFound("Signup"))
        ));

        let reclaimed =
            SignupService::create_signup(&db, new_signup(workout.id, monday(), "Tinder")).await;
        assert!(reclaimed.is_ok());
    }

    #[tokio::test]
    async fn test_details_in_range_are_ordered() {
        let db = connect_in_memory().await.unwrap();
        let apex = seed_location(&db, "Apex").await;
        let late = seed_workout(&db, apex.id, DayOfWeek::Monday, "06:15").await;
        let early = seed_workout(&db, apex.id, DayOfWeek::Monday, "05:00").await;
        let tuesday = seed_workout(&db, apex.id, DayOfWeek::Tuesday, "05:30").await;

        seed_signup(&db, tuesday.id, date("2024-01-02"), "Hoops").await;
        seed_signup(&db, late.id, monday(), "Slaw").await;
        seed_signup(&db, early.id, monday(), "Tinder").await;
        seed_signup(&db, early.id, date("2024-01-15"), "Outside").await;

        let details = SignupService::details_in_range(&db, monday(), date("2024-01-07"))
            .await
            .unwrap();
        let names: Vec<_> = details.iter().map(|d| d.signup.q_name.as_str()).collect();
        assert_eq!(names, vec!["Tinder", "Slaw", "Hoops"]);
        assert!(details.iter().all(|d| d.location.id == apex.id));
    }

    #[tokio::test]
    async fn test_needing_reminder() {
        let db = connect_in_memory().await.unwrap();
        let apex = seed_location(&db, "Apex").await;
        let early = seed_workout(&db, apex.id, DayOfWeek::Monday, "05:00").await;
        let late = seed_workout(&db, apex.id, DayOfWeek::Monday, "06:00").await;
        let other = seed_workout(&db, apex.id, DayOfWeek::Tuesday, "05:00").await;

        let reminded = seed_signup(&db, early.id, monday(), "Slaw").await;
        SignupService::mark_reminded(&db, reminded.id).await.unwrap();

        let no_email = SignupService::create_signup(&db, new_signup(late.id, monday(), "Tinder"))
            .await
            .unwrap();
        seed_signup(&db, other.id, date("2024-01-02"), "Hoops").await;
        let pending = seed_signup(&db, early.id, date("2024-01-08"), "Gumby").await;

        assert!(
            SignupService::needing_reminder(&db, monday())
                .await
                .unwrap()
                .is_empty()
        );

        let due = SignupService::needing_reminder(&db, date("2024-01-08"))
            .await
            .unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].signup.id, pending.id);
        assert_ne!(due[0].signup.id, no_email);
    }

    #[tokio::test]
    async fn test_created_since() {
        let db = connect_in_memory().await.unwrap();
        let apex = seed_location(&db, "Apex").await;
        let workout = seed_workout(&db, apex.id, DayOfWeek::Monday, "05:30").await;
        seed_signup(&db, workout.id, monday(), "Slaw").await;

        let an_hour_ago = Utc::now().naive_utc() - chrono::TimeDelta::hours(1);
        let recent = SignupService::created_since(&db, an_hour_ago).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].location.name, "Apex");

        let in_the_future = Utc::now().naive_utc() + chrono::TimeDelta::hours(1);
        assert!(
            SignupService::created_since(&db, in_the_future)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_get_details() {
        let db = connect_in_memory().await.unwrap();
        let apex = seed_location(&db, "Apex").await;
        let workout = seed_workout(&db, apex.id, DayOfWeek::Monday, "05:30").await;
        let signup = seed_signup(&db, workout.id, monday(), "Slaw").await;

        let details = SignupService::get_details(&db, signup.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(details.workout.id, workout.id);
        assert_eq!(details.location.name, "Apex");

        assert!(
            SignupService::get_details(&db, Uuid::new_v4())
                .await
                .unwrap()
                .is_none()
        );
    }
}
