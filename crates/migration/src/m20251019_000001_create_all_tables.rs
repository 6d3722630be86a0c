use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create locations table
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Locations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Locations::Name).string().not_null())
                    .col(ColumnDef::new(Locations::Address).string().not_null())
                    .col(ColumnDef::new(Locations::Region).string().not_null())
                    .col(ColumnDef::new(Locations::Latitude).double())
                    .col(ColumnDef::new(Locations::Longitude).double())
                    .col(
                        ColumnDef::new(Locations::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Locations::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create workouts table, one row per weekly recurrence
        manager
            .create_table(
                Table::create()
                    .table(Workouts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Workouts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Workouts::LocationId).uuid().not_null())
                    // 0 = Sunday .. 6 = Saturday
                    .col(ColumnDef::new(Workouts::DayOfWeek).integer().not_null())
                    .col(ColumnDef::new(Workouts::Time).time().not_null())
                    .col(ColumnDef::new(Workouts::WorkoutType).string().not_null())
                    .col(
                        ColumnDef::new(Workouts::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Workouts::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-workouts-location_id")
                            .from(Workouts::Table, Workouts::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create signups table
        manager
            .create_table(
                Table::create()
                    .table(Signups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Signups::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Signups::WorkoutId).uuid().not_null())
                    .col(ColumnDef::new(Signups::Date).date().not_null())
                    .col(ColumnDef::new(Signups::QName).string().not_null())
                    .col(ColumnDef::new(Signups::QEmail).string())
                    .col(ColumnDef::new(Signups::Notes).text())
                    .col(
                        ColumnDef::new(Signups::Reminded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Signups::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-signups-workout_id")
                            .from(Signups::Table, Signups::WorkoutId)
                            .to(Workouts::Table, Workouts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create settings table
        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Settings::Key)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Settings::Value).text().not_null())
                    .col(ColumnDef::new(Settings::Description).text())
                    .col(ColumnDef::new(Settings::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Signups::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Workouts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Locations {
    Table,
    Id,
    Name,
    Address,
    Region,
    Latitude,
    Longitude,
    Active,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum Workouts {
    Table,
    Id,
    LocationId,
    DayOfWeek,
    Time,
    WorkoutType,
    Active,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum Signups {
    Table,
    Id,
    WorkoutId,
    Date,
    QName,
    QEmail,
    Notes,
    Reminded,
    CreatedAt,
}

#[derive(Iden)]
enum Settings {
    Table,
    Key,
    Value,
    Description,
    UpdatedAt,
}
