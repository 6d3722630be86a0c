use crate::m20251019_000001_create_all_tables::{Locations, Signups, Workouts};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One Q per workout per date. Claiming a slot relies on this index
        // rejecting the second insert.
        manager
            .create_index(
                Index::create()
                    .name("idx_signups_workout_id_date")
                    .table(Signups::Table)
                    .col(Signups::WorkoutId)
                    .col(Signups::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on signups.date for range queries
        manager
            .create_index(
                Index::create()
                    .name("idx_signups_date")
                    .table(Signups::Table)
                    .col(Signups::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_signups_created_at")
                    .table(Signups::Table)
                    .col(Signups::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index on workouts.location_id for faster joins
        manager
            .create_index(
                Index::create()
                    .name("idx_workouts_location_id")
                    .table(Workouts::Table)
                    .col(Workouts::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_locations_name")
                    .table(Locations::Table)
                    .col(Locations::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_locations_name")
                    .table(Locations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_workouts_location_id")
                    .table(Workouts::Table)
                    .to_owned(),
            )
            .await?;

        for name in [
            "idx_signups_created_at",
            "idx_signups_date",
            "idx_signups_workout_id_date",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Signups::Table).to_owned())
                .await?;
        }

        Ok(())
    }
}
