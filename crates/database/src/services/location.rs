use crate::{
    entities::{locations, signups, workouts},
    error::{ServiceError, ServiceResult},
    services::{non_blank, required},
};
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use serde::Deserialize;
use uuid::Uuid;

/// Region assigned to locations created without one
pub const DEFAULT_REGION: &str = "Cherokee";

#[derive(Debug, Clone, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// The fields of a location an admin may change. `None` leaves a field as is;
/// `Some(None)` clears a coordinate.
#[derive(Debug, Clone, Default)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub region: Option<String>,
    pub latitude: Option<Option<f64>>,
    pub longitude: Option<Option<f64>>,
    pub active: Option<bool>,
}

pub struct LocationService;

impl LocationService {
    /// All locations ordered by name, optionally only the active ones
    pub async fn list(
        db: &DatabaseConnection,
        active_only: bool,
    ) -> Result<Vec<locations::Model>, DbErr> {
        let mut query = locations::Entity::find();
        if active_only {
            query = query.filter(locations::Column::Active.eq(true));
        }

        query.order_by_asc(locations::Column::Name).all(db).await
    }

    pub async fn get(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<locations::Model>, DbErr> {
        locations::Entity::find_by_id(id).one(db).await
    }

    pub async fn create(
        db: &DatabaseConnection,
        new: NewLocation,
    ) -> ServiceResult<locations::Model> {
        let location = locations::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(required(new.name, "Name")?),
            address: Set(required(new.address, "Address")?),
            region: Set(non_blank(new.region).unwrap_or_else(|| DEFAULT_REGION.to_string())),
            latitude: Set(new.latitude),
            longitude: Set(new.longitude),
            active: Set(true),
            created_at: Set(Utc::now().naive_utc()),
        };

        Ok(location.insert(db).await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        patch: LocationPatch,
    ) -> ServiceResult<locations::Model> {
        let location = Self::get(db, id)
            .await?
            .ok_or(ServiceError::NotFound("Location"))?;
        let mut active = location.clone().into_active_model();

        if let Some(name) = patch.name {
            active.name = Set(required(name, "Name")?);
        }
        if let Some(address) = patch.address {
            active.address = Set(required(address, "Address")?);
        }
        if let Some(region) = patch.region {
            active.region = Set(required(region, "Region")?);
        }
        if let Some(latitude) = patch.latitude {
            active.latitude = Set(latitude);
        }
        if let Some(longitude) = patch.longitude {
            active.longitude = Set(longitude);
        }
        if let Some(is_active) = patch.active {
            active.active = Set(is_active);
        }

        if !active.is_changed() {
            return Ok(location);
        }

        Ok(active.update(db).await?)
    }

    /// Deletes a location together with its workouts and their signups
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> ServiceResult<()> {
        let txn = db.begin().await?;

        let workout_ids: Vec<Uuid> = workouts::Entity::find()
            .select_only()
            .column(workouts::Column::Id)
            .filter(workouts::Column::LocationId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        let removed_signups = signups::Entity::delete_many()
            .filter(signups::Column::WorkoutId.is_in(workout_ids.clone()))
            .exec(&txn)
            .await?
            .rows_affected;

        workouts::Entity::delete_many()
            .filter(workouts::Column::LocationId.eq(id))
            .exec(&txn)
            .await?;

        let deleted = locations::Entity::delete_by_id(id).exec(&txn).await?;
        if deleted.rows_affected == 0 {
            return Err(ServiceError::NotFound("Location"));
        }

        txn.commit().await?;
        info!(
            "Deleted location {id} with {} workouts and {removed_signups} signups",
            workout_ids.len()
        );

        Ok(())
    }
}
