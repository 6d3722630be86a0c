use crate::schedule::Slot;
use serde::Serialize;

/// How many occurrences in a window have a Q signed up
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoverageStats {
    pub total_slots: u64,
    pub covered_slots: u64,
    pub empty_slots: u64,
    /// Percentage of slots covered, between 0 and 100
    pub coverage_percent: f64,
    /// Signups in the window that match no active occurrence
    pub stale_signups: u64,
}

impl CoverageStats {
    pub fn new(total_slots: u64, covered_slots: u64, signups_in_window: u64) -> Self {
        let covered_slots = covered_slots.min(total_slots);
        let coverage_percent = if total_slots > 0 {
            (covered_slots as f64 / total_slots as f64 * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            total_slots,
            covered_slots,
            empty_slots: total_slots.saturating_sub(covered_slots),
            coverage_percent,
            stale_signups: signups_in_window.saturating_sub(covered_slots),
        }
    }

    /// Computes coverage from joined slots.
    ///
    /// Only signups attached to an active occurrence count as covering it;
    /// the rest of `signups_in_window` are reported as stale.
    pub fn from_slots<W, S>(slots: &[Slot<'_, W, S>], signups_in_window: usize) -> Self {
        let covered = slots.iter().filter(|slot| slot.is_covered()).count();
        Self::new(slots.len() as u64, covered as u64, signups_in_window as u64)
    }
}

#[cfg(test)]
mod test {
    use super::CoverageStats;
    use crate::{
        days::DayOfWeek,
        schedule::{
            join_signups, project_occurrences,
            test::{Claimed, date, rule},
        },
    };

    #[test]
    fn test_three_workouts_one_signup() {
        let workouts = [
            rule(1, DayOfWeek::Monday, "05:30"),
            rule(2, DayOfWeek::Wednesday, "05:30"),
            rule(3, DayOfWeek::Saturday, "07:00"),
        ];
        let signups = [Claimed {
            signup_id: 1,
            workout_id: 2,
            date: date("2024-01-03"),
        }];

        let occurrences = project_occurrences(&workouts, date("2024-01-01"), date("2024-01-07"));
        let slots = join_signups(occurrences, &signups);
        let stats = CoverageStats::from_slots(&slots, signups.len());

        assert_eq!(stats.total_slots, 3);
        assert_eq!(stats.covered_slots, 1);
        assert_eq!(stats.empty_slots, 2);
        assert!((stats.coverage_percent - 33.33).abs() < 0.01);
        assert_eq!(stats.stale_signups, 0);
    }

    #[test]
    fn test_no_slots_is_zero_percent() {
        let stats = CoverageStats::new(0, 0, 0);
        assert_eq!(stats.coverage_percent, 0.0);
        assert_eq!(stats.empty_slots, 0);
    }

    #[test]
    fn test_stale_signups_do_not_count() {
        let mut inactive = rule(2, DayOfWeek::Monday, "05:30");
        inactive.active = false;
        let workouts = [rule(1, DayOfWeek::Monday, "05:30"), inactive];
        let signups = [
            Claimed {
                signup_id: 1,
                workout_id: 2,
                date: date("2024-01-01"),
            },
            Claimed {
                signup_id: 2,
                workout_id: 7,
                date: date("2024-01-01"),
            },
        ];

        let occurrences = project_occurrences(&workouts, date("2024-01-01"), date("2024-01-07"));
        let slots = join_signups(occurrences, &signups);
        let stats = CoverageStats::from_slots(&slots, signups.len());

        assert_eq!(stats.total_slots, 1);
        assert_eq!(stats.covered_slots, 0);
        assert_eq!(stats.empty_slots, 1);
        assert_eq!(stats.stale_signups, 2);
    }

    #[test]
    fn test_percent_stays_in_bounds() {
        for (total, covered) in [(1, 1), (4, 3), (7, 0), (2, 5)] {
            let stats = CoverageStats::new(total, covered, covered);
            assert!((0.0..=100.0).contains(&stats.coverage_percent));
            assert!(stats.covered_slots <= stats.total_slots);
        }

        assert_eq!(CoverageStats::new(4, 4, 4).coverage_percent, 100.0);
    }
}
