use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Aggregate view over a user's workout history. Recomputed from the
/// stored workout dates on every request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutStats {
    pub workouts_this_week: u32,
    pub weekly_goal: u32,
    pub total_workouts: u32,
    pub last_workout_date: Option<NaiveDate>,
    pub streak_days: u32,
    pub average_workouts_per_week: f64,
}

/// Start of the current week: the most recent Sunday.
pub fn start_of_week(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_sunday()))
}

/// Computes `WorkoutStats` from an unordered list of workout dates.
/// `today` is the caller's local date; `weekly_goal` must already be
/// clamped to >= 1.
pub fn compute_stats(dates: &[NaiveDate], weekly_goal: u32, today: NaiveDate) -> WorkoutStats {
    let week_start = start_of_week(today);
    let workouts_this_week = dates.iter().filter(|d| **d >= week_start).count() as u32;
    let total_workouts = dates.len() as u32;
    let last_workout_date = dates.iter().max().copied();

    WorkoutStats {
        workouts_this_week,
        weekly_goal,
        total_workouts,
        last_workout_date,
        streak_days: streak_days(dates, today),
        average_workouts_per_week: average_per_week(dates, today),
    }
}

/// Consecutive calendar days with at least one workout, ending today or
/// yesterday. A gap of more than one day breaks the streak.
pub fn streak_days(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut days: Vec<NaiveDate> = dates.to_vec();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let mut streak = 0u32;
    let mut cursor = today;
    for day in days {
        let gap = (cursor - day).num_days();
        let continues = if streak == 0 { gap <= 1 } else { gap == 1 };
        if !continues {
            break;
        }
        streak += 1;
        cursor = day;
    }
    streak
}

fn average_per_week(dates: &[NaiveDate], today: NaiveDate) -> f64 {
    let Some(earliest) = dates.iter().min() else {
        return 0.0;
    };
    let elapsed_days = (today - *earliest).num_days().max(0) + 1;
    let weeks = ((elapsed_days + 6) / 7).max(1);
    dates.len() as f64 / weeks as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2025-06-18 is a Wednesday
        assert_eq!(start_of_week(date(2025, 6, 18)), date(2025, 6, 15));
        // A Sunday is its own week start
        assert_eq!(start_of_week(date(2025, 6, 15)), date(2025, 6, 15));
        // Saturday still belongs to the week that began six days earlier
        assert_eq!(start_of_week(date(2025, 6, 21)), date(2025, 6, 15));
    }

    #[test]
    fn counts_only_dates_in_current_week() {
        let today = date(2025, 6, 18); // Wednesday, week starts 06-15
        let dates = vec![
            date(2025, 6, 18),
            date(2025, 6, 16),
            date(2025, 6, 15), // Sunday boundary, counts
            date(2025, 6, 14), // Saturday before, does not
            date(2025, 6, 1),
        ];
        let stats = compute_stats(&dates, 3, today);
        assert_eq!(stats.workouts_this_week, 3);
        assert_eq!(stats.total_workouts, 5);
        assert_eq!(stats.last_workout_date, Some(date(2025, 6, 18)));
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let today = date(2025, 6, 18);
        let dates = vec![date(2025, 6, 18), date(2025, 6, 17), date(2025, 6, 16)];
        assert_eq!(streak_days(&dates, today), 3);
    }

    #[test]
    fn streak_breaks_on_two_day_gap() {
        let today = date(2025, 6, 18);
        let dates = vec![date(2025, 6, 18), date(2025, 6, 16)];
        assert_eq!(streak_days(&dates, today), 1);
    }

    #[test]
    fn streak_may_start_yesterday() {
        let today = date(2025, 6, 18);
        let dates = vec![date(2025, 6, 17), date(2025, 6, 16)];
        assert_eq!(streak_days(&dates, today), 2);
    }

    #[test]
    fn streak_is_zero_when_last_workout_is_older_than_yesterday() {
        let today = date(2025, 6, 18);
        let dates = vec![date(2025, 6, 15), date(2025, 6, 14)];
        assert_eq!(streak_days(&dates, today), 0);
    }

    #[test]
    fn streak_is_zero_without_workouts() {
        assert_eq!(streak_days(&[], date(2025, 6, 18)), 0);
    }

    #[test]
    fn same_day_duplicates_count_once_for_streak() {
        let today = date(2025, 6, 18);
        let dates = vec![date(2025, 6, 18), date(2025, 6, 18), date(2025, 6, 17)];
        assert_eq!(streak_days(&dates, today), 2);
    }

    #[test]
    fn average_per_week_uses_elapsed_weeks() {
        let today = date(2025, 6, 18);
        // 6 workouts over 14 elapsed days -> 2 weeks -> 3.0
        let dates: Vec<NaiveDate> = (0..6).map(|i| today - Duration::days(i * 2)).collect();
        let stats = compute_stats(&dates, 3, today);
        assert!((stats.average_workouts_per_week - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_history_yields_zeroed_stats() {
        let stats = compute_stats(&[], 3, date(2025, 6, 18));
        assert_eq!(stats.workouts_this_week, 0);
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.streak_days, 0);
        assert_eq!(stats.last_workout_date, None);
        assert_eq!(stats.average_workouts_per_week, 0.0);
    }
}
