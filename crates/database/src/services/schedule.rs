use crate::{
    entities::signups,
    services::{
        signup::SignupService,
        workout::{ScheduledWorkout, WorkoutService},
    },
};
use chrono::NaiveDate;
use models::{
    coverage::CoverageStats,
    schedule::{Occurrence, Slot, join_signups, project_occurrences},
};
use sea_orm::{DatabaseConnection, DbErr};

/// The active workouts and the signups within a date window, loaded once and
/// projected on demand
#[derive(Debug, Clone)]
pub struct ScheduleWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub workouts: Vec<ScheduledWorkout>,
    pub signups: Vec<signups::Model>,
}

impl ScheduleWindow {
    pub async fn load(
        db: &DatabaseConnection,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, DbErr> {
        let workouts = WorkoutService::list(db, true).await?;
        let signups = if start <= end {
            SignupService::in_range(db, start, end).await?
        } else {
            Vec::new()
        };

        Ok(Self {
            start,
            end,
            workouts,
            signups,
        })
    }

    pub fn occurrences(&self) -> Vec<Occurrence<'_, ScheduledWorkout>> {
        project_occurrences(&self.workouts, self.start, self.end)
    }

    /// Every occurrence in the window with the signup covering it, if any
    pub fn slots(&self) -> Vec<Slot<'_, ScheduledWorkout, signups::Model>> {
        join_signups(self.occurrences(), &self.signups)
    }

    /// Occurrences nobody has signed up for
    pub fn empty_slots(&self) -> Vec<Occurrence<'_, ScheduledWorkout>> {
        self.slots()
            .into_iter()
            .filter(|slot| !slot.is_covered())
            .map(|slot| slot.occurrence)
            .collect()
    }

    pub fn coverage(&self) -> CoverageStats {
        CoverageStats::from_slots(&self.slots(), self.signups.len())
    }
}

pub struct ScheduleService;

impl ScheduleService {
    /// Coverage of the active workouts between `start` and `end`, inclusive
    pub async fn coverage(
        db: &DatabaseConnection,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<CoverageStats, DbErr> {
        Ok(ScheduleWindow::load(db, start, end).await?.coverage())
    }
}
