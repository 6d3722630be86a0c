use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

#[cfg(feature = "database")]
use sea_orm::{DeriveActiveEnum, EnumIter};

/// The day of the week a workout recurs on.
///
/// Days are numbered the way they are stored: Sunday is 0 and Saturday is 6.
/// chrono numbers weekdays from Monday instead, so every date-to-day
/// conversion must go through [`DayOfWeek::from_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(EnumIter, DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "i32", db_type = "Integer"))]
#[serde(try_from = "i32", into = "i32")]
pub enum DayOfWeek {
    #[cfg_attr(feature = "database", sea_orm(num_value = 0))]
    Sunday,
    #[cfg_attr(feature = "database", sea_orm(num_value = 1))]
    Monday,
    #[cfg_attr(feature = "database", sea_orm(num_value = 2))]
    Tuesday,
    #[cfg_attr(feature = "database", sea_orm(num_value = 3))]
    Wednesday,
    #[cfg_attr(feature = "database", sea_orm(num_value = 4))]
    Thursday,
    #[cfg_attr(feature = "database", sea_orm(num_value = 5))]
    Friday,
    #[cfg_attr(feature = "database", sea_orm(num_value = 6))]
    Saturday,
}

impl DayOfWeek {
    /// All days in storage order, starting with Sunday
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Day-to-name mapping for parsing and display
    const DAY_NAMES: [(Self, &'static str, &'static str); 7] = [
        (Self::Sunday, "Sunday", "Sun"),
        (Self::Monday, "Monday", "Mon"),
        (Self::Tuesday, "Tuesday", "Tue"),
        (Self::Wednesday, "Wednesday", "Wed"),
        (Self::Thursday, "Thursday", "Thu"),
        (Self::Friday, "Friday", "Fri"),
        (Self::Saturday, "Saturday", "Sat"),
    ];

    /// Returns the stored day of the week a calendar date falls on.
    ///
    /// This is the only place that translates chrono's Monday-based weekday
    /// numbering into the Sunday-based storage numbering.
    pub fn from_date(date: NaiveDate) -> Self {
        let calendar_weekday = date.weekday().num_days_from_monday();
        Self::ALL[((calendar_weekday + 1) % 7) as usize]
    }

    /// The storage number of the day, 0 (Sunday) through 6 (Saturday)
    pub fn number(self) -> i32 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    /// Position of the day in [`DayOfWeek::ALL`]
    pub fn index(self) -> usize {
        self.number() as usize
    }

    pub fn name(self) -> &'static str {
        Self::DAY_NAMES[self.index()].1
    }

    pub fn abbreviation(self) -> &'static str {
        Self::DAY_NAMES[self.index()].2
    }
}

impl TryFrom<i32> for DayOfWeek {
    type Error = String;

    fn try_from(number: i32) -> Result<Self, Self::Error> {
        usize::try_from(number)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| format!("Day of week must be between 0 and 6, got {number}"))
    }
}

impl From<DayOfWeek> for i32 {
    fn from(day: DayOfWeek) -> Self {
        day.number()
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(number) = s.parse::<i32>() {
            return Self::try_from(number);
        }

        Self::DAY_NAMES
            .iter()
            .find(|(_, name, abbreviation)| {
                name.eq_ignore_ascii_case(s) || abbreviation.eq_ignore_ascii_case(s)
            })
            .map(|&(day, _, _)| day)
            .ok_or_else(|| format!("Unknown day of week: {s}"))
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name())
    }
}
