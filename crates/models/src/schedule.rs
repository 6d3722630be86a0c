//! Projection of weekly workout rules onto calendar dates.
//!
//! Everything here is a pure function of the rules, signups and window passed
//! in. Nothing is fetched or stored.

use crate::days::DayOfWeek;
use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta};
use std::{collections::HashMap, hash::Hash};

/// A rule that recurs every week on one day at one time
pub trait Recurrence {
    type Id: Copy + Eq + Hash + Ord;

    fn workout_id(&self) -> Self::Id;
    fn day_of_week(&self) -> DayOfWeek;
    fn time(&self) -> NaiveTime;

    /// Inactive rules never produce occurrences
    fn is_active(&self) -> bool;
}

/// A claim on a single dated occurrence of a workout
pub trait Claim {
    type Id: Copy + Eq + Hash;

    fn workout_id(&self) -> Self::Id;
    fn date(&self) -> NaiveDate;
}

/// One dated instance of a recurring workout
#[derive(Debug)]
pub struct Occurrence<'a, W> {
    pub workout: &'a W,
    pub date: NaiveDate,
}

impl<W> Clone for Occurrence<'_, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for Occurrence<'_, W> {}

/// An occurrence and the signup covering it, if any
#[derive(Debug)]
pub struct Slot<'a, W, S> {
    pub occurrence: Occurrence<'a, W>,
    pub signup: Option<&'a S>,
}

impl<W, S> Slot<'_, W, S> {
    pub fn is_covered(&self) -> bool {
        self.signup.is_some()
    }
}

/// Enumerates every occurrence of the active workouts between `start` and
/// `end`, both inclusive.
///
/// Occurrences are ordered by date, then time of day, then workout id. An
/// inverted range yields nothing.
pub fn project_occurrences<W: Recurrence>(
    workouts: &[W],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Occurrence<'_, W>> {
    if start > end {
        return Vec::new();
    }

    // Bucket by day so each date only looks at its own workouts
    let mut buckets: [Vec<&W>; 7] = Default::default();
    for workout in workouts.iter().filter(|w| w.is_active()) {
        buckets[workout.day_of_week().index()].push(workout);
    }
    for bucket in &mut buckets {
        bucket.sort_by_key(|w| (w.time(), w.workout_id()));
    }

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .flat_map(|date| {
            buckets[DayOfWeek::from_date(date).index()]
                .iter()
                .map(move |&workout| Occurrence { workout, date })
        })
        .collect()
}

/// Attaches to each occurrence the signup with the same workout and date.
///
/// Signups are indexed once up front, so each occurrence is a single lookup.
/// Signups that match no occurrence are ignored.
pub fn join_signups<'a, W, S>(
    occurrences: Vec<Occurrence<'a, W>>,
    signups: &'a [S],
) -> Vec<Slot<'a, W, S>>
where
    W: Recurrence,
    S: Claim<Id = W::Id>,
{
    let by_slot: HashMap<(W::Id, NaiveDate), &S> = signups
        .iter()
        .map(|signup| ((signup.workout_id(), signup.date()), signup))
        .collect();

    occurrences
        .into_iter()
        .map(|occurrence| Slot {
            signup: by_slot
                .get(&(occurrence.workout.workout_id(), occurrence.date))
                .copied(),
            occurrence,
        })
        .collect()
}

/// Returns the Monday and Sunday of the week `offset` weeks away from the
/// week containing `today`, or `None` if that week is outside chrono's range.
pub fn week_bounds(today: NaiveDate, offset: i64) -> Option<(NaiveDate, NaiveDate)> {
    let days_since_monday = TimeDelta::try_days(i64::from(today.weekday().num_days_from_monday()))?;
    let monday = today
        .checked_sub_signed(days_since_monday)?
        .checked_add_signed(TimeDelta::try_weeks(offset)?)?;
    let sunday = monday.checked_add_signed(TimeDelta::try_days(6)?)?;

    Some((monday, sunday))
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Rule {
        pub id: u32,
        pub day: DayOfWeek,
        pub time: NaiveTime,
        pub active: bool,
    }

    impl Recurrence for Rule {
        type Id = u32;

        fn workout_id(&self) -> u32 {
            self.id
        }

        fn day_of_week(&self) -> DayOfWeek {
            self.day
        }

        fn time(&self) -> NaiveTime {
            self.time
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Claimed {
        pub signup_id: u32,
        pub workout_id: u32,
        pub date: NaiveDate,
    }

    impl Claim for Claimed {
        type Id = u32;

        fn workout_id(&self) -> u32 {
            self.workout_id
        }

        fn date(&self) -> NaiveDate {
            self.date
        }
    }

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub fn rule(id: u32, day: DayOfWeek, time: &str) -> Rule {
        Rule {
            id,
            day,
            time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            active: true,
        }
    }

    #[test]
    fn test_monday_workout_over_two_weeks() {
        let workouts = [rule(1, DayOfWeek::Monday, "05:30")];
        let occurrences = project_occurrences(&workouts, date("2024-01-01"), date("2024-01-14"));

        let dates: Vec<_> = occurrences.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date("2024-01-01"), date("2024-01-08")]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let workouts = [rule(1, DayOfWeek::Monday, "05:30")];
        assert!(project_occurrences(&workouts, date("2024-01-14"), date("2024-01-01")).is_empty());
    }

    #[test]
    fn test_single_day_range() {
        let workouts = [
            rule(1, DayOfWeek::Monday, "05:30"),
            rule(2, DayOfWeek::Tuesday, "05:30"),
        ];
        let occurrences = project_occurrences(&workouts, date("2024-01-02"), date("2024-01-02"));

        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].workout.id, 2);
    }

    #[test]
    fn test_inactive_workouts_are_skipped() {
        let mut inactive = rule(2, DayOfWeek::Monday, "06:00");
        inactive.active = false;
        let workouts = [rule(1, DayOfWeek::Monday, "05:30"), inactive];

        let occurrences = project_occurrences(&workouts, date("2024-01-01"), date("2024-01-31"));
        assert!(occurrences.iter().all(|o| o.workout.id == 1));
        assert_eq!(occurrences.len(), 5);
    }

    #[test]
    fn test_every_occurrence_falls_on_its_day() {
        let workouts: Vec<_> = DayOfWeek::ALL
            .iter()
            .enumerate()
            .map(|(i, &day)| rule(i as u32, day, "05:15"))
            .collect();

        let occurrences = project_occurrences(&workouts, date("2024-02-01"), date("2024-04-30"));
        assert_eq!(occurrences.len(), 90);
        for occurrence in occurrences {
            assert_eq!(DayOfWeek::from_date(occurrence.date), occurrence.workout.day);
        }
    }

    #[test]
    fn test_ordering_by_date_then_time() {
        let workouts = [
            rule(1, DayOfWeek::Wednesday, "06:00"),
            rule(2, DayOfWeek::Tuesday, "05:30"),
            rule(3, DayOfWeek::Wednesday, "05:00"),
            rule(4, DayOfWeek::Tuesday, "05:00"),
            rule(5, DayOfWeek::Wednesday, "05:00"),
        ];

        let occurrences = project_occurrences(&workouts, date("2024-01-01"), date("2024-01-14"));
        let keys: Vec<_> = occurrences
            .iter()
            .map(|o| (o.date, o.workout.time, o.workout.id))
            .collect();

        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        let first_week: Vec<_> = occurrences.iter().take(5).map(|o| o.workout.id).collect();
        assert_eq!(first_week, vec![4, 2, 3, 5, 1]);
    }

    #[test]
    fn test_join_matches_exact_pairs_only() {
        let workouts = [
            rule(1, DayOfWeek::Monday, "05:30"),
            rule(2, DayOfWeek::Monday, "06:00"),
        ];
        let signups = [
            Claimed {
                signup_id: 10,
                workout_id: 1,
                date: date("2024-01-08"),
            },
            // Right workout, wrong date
            Claimed {
                signup_id: 11,
                workout_id: 2,
                date: date("2024-01-09"),
            },
            // Unknown workout
            Claimed {
                signup_id: 12,
                workout_id: 99,
                date: date("2024-01-01"),
            },
        ];

        let occurrences = project_occurrences(&workouts, date("2024-01-01"), date("2024-01-14"));
        let slots = join_signups(occurrences, &signups);

        assert_eq!(slots.len(), 4);
        let covered: Vec<_> = slots
            .iter()
            .filter_map(|slot| slot.signup.map(|s| (slot.occurrence.date, s.signup_id)))
            .collect();
        assert_eq!(covered, vec![(date("2024-01-08"), 10)]);

        for slot in &slots {
            if let Some(signup) = slot.signup {
                assert_eq!(signup.workout_id, slot.occurrence.workout.id);
                assert_eq!(signup.date, slot.occurrence.date);
            }
        }
    }

    #[test]
    fn test_join_with_no_signups_leaves_slots_empty() {
        let workouts = [rule(1, DayOfWeek::Friday, "05:30")];
        let occurrences = project_occurrences(&workouts, date("2024-01-01"), date("2024-01-31"));
        let slots = join_signups::<_, Claimed>(occurrences, &[]);

        assert_eq!(slots.len(), 4);
        assert!(slots.iter().all(|slot| !slot.is_covered()));
    }

    #[test]
    fn test_week_bounds() {
        // Wednesday
        let today = date("2024-01-10");

        assert_eq!(
            week_bounds(today, 0),
            Some((date("2024-01-08"), date("2024-01-14")))
        );
        assert_eq!(
            week_bounds(today, 1),
            Some((date("2024-01-15"), date("2024-01-21")))
        );
        assert_eq!(
            week_bounds(today, -2),
            Some((date("2023-12-25"), date("2023-12-31")))
        );
        assert_eq!(week_bounds(today, i64::MAX), None);
    }
}
