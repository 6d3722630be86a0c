use models::schedule::Claim;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A Q's claim on one dated occurrence of a workout
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "signups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub workout_id: Uuid,
    pub date: Date,
    pub q_name: String,
    pub q_email: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub reminded: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workout::Entity",
        from = "Column::WorkoutId",
        to = "super::workout::Column::Id"
    )]
    Workout,
}

impl Related<super::workout::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workout.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Claim for Model {
    type Id = Uuid;

    fn workout_id(&self) -> Uuid {
        self.workout_id
    }

    fn date(&self) -> Date {
        self.date
    }
}
