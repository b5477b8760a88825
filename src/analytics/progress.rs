use crate::db;
use crate::domain::motivation::ProgressDelta;
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;

const WINDOW_DAYS: i64 = 30;

/// Aggregates of one training window used for delta computation.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSnapshot {
    pub total_volume: f64,
    pub avg_top_weight: f64,
    pub active_days: i64,
}

/// Compares the last 30 days against the 30 days before them and derives
/// the percentage deltas the progress message variant consumes.
pub async fn build_progress_delta(
    pool: &PgPool,
    user_id: Uuid,
    today: NaiveDate,
) -> Result<ProgressDelta> {
    let current_start = today - Duration::days(WINDOW_DAYS);
    let previous_start = today - Duration::days(WINDOW_DAYS * 2);

    let current = db::workout_window_snapshot(pool, user_id, current_start, today).await?;
    let previous = db::workout_window_snapshot(pool, user_id, previous_start, current_start).await?;

    Ok(delta_between(current.as_ref(), previous.as_ref()))
}

/// Pure delta derivation. An absent or zero baseline yields 0% rather
/// than an error or a division blowup.
pub fn delta_between(
    current: Option<&WindowSnapshot>,
    previous: Option<&WindowSnapshot>,
) -> ProgressDelta {
    let Some(current) = current else {
        return ProgressDelta {
            volume_increase: 0.0,
            strength_increase: 0.0,
            consistency_score: 0.0,
        };
    };

    let consistency_score =
        (current.active_days as f64 / WINDOW_DAYS as f64 * 100.0).clamp(0.0, 100.0);

    let (volume_increase, strength_increase) = match previous {
        Some(prev) => (
            percent_change(current.total_volume, prev.total_volume),
            percent_change(current.avg_top_weight, prev.avg_top_weight),
        ),
        None => (0.0, 0.0),
    };

    ProgressDelta {
        volume_increase,
        strength_increase,
        consistency_score,
    }
}

fn percent_change(current: f64, baseline: f64) -> f64 {
    if baseline <= 0.0 {
        return 0.0;
    }
    (current - baseline) / baseline * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(volume: f64, top: f64, days: i64) -> WindowSnapshot {
        WindowSnapshot {
            total_volume: volume,
            avg_top_weight: top,
            active_days: days,
        }
    }

    #[test]
    fn deltas_are_percentages_against_the_previous_window() {
        let delta = delta_between(
            Some(&window(12_000.0, 92.0, 15)),
            Some(&window(10_000.0, 80.0, 12)),
        );
        assert!((delta.volume_increase - 20.0).abs() < 1e-9);
        assert!((delta.strength_increase - 15.0).abs() < 1e-9);
        assert!((delta.consistency_score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn missing_baseline_yields_zero_deltas() {
        let delta = delta_between(Some(&window(12_000.0, 92.0, 30)), None);
        assert_eq!(delta.volume_increase, 0.0);
        assert_eq!(delta.strength_increase, 0.0);
        assert!((delta.consistency_score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_current_window_is_all_zero() {
        let delta = delta_between(None, Some(&window(5_000.0, 60.0, 10)));
        assert_eq!(delta.volume_increase, 0.0);
        assert_eq!(delta.strength_increase, 0.0);
        assert_eq!(delta.consistency_score, 0.0);
    }

    #[test]
    fn zero_baseline_never_divides() {
        let delta = delta_between(
            Some(&window(5_000.0, 60.0, 10)),
            Some(&window(0.0, 0.0, 0)),
        );
        assert_eq!(delta.volume_increase, 0.0);
        assert_eq!(delta.strength_increase, 0.0);
    }
}
