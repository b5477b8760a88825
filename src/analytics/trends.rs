use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Chart window selected by the progress view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendRange {
    Week,
    Month,
    Year,
}

impl TrendRange {
    pub fn days(&self) -> i64 {
        match self {
            TrendRange::Week => 7,
            TrendRange::Month => 30,
            TrendRange::Year => 365,
        }
    }

    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(self.days())
    }
}

impl TryFrom<&str> for TrendRange {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "week" => Ok(TrendRange::Week),
            "month" => Ok(TrendRange::Month),
            "year" => Ok(TrendRange::Year),
            _ => Err(()),
        }
    }
}

/// One aggregated workout day as stored (days without workouts are absent).
#[derive(Debug, Clone)]
pub struct DailyWorkoutRow {
    pub date: NaiveDate,
    pub workouts: i64,
    pub sets: i64,
    pub volume: f64,
}

/// One chart point. Every day in the window is present, zero-filled when
/// nothing was logged.
#[derive(Debug, Clone, Serialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub workouts: i64,
    pub sets: i64,
    pub volume: f64,
}

/// Per-category slice of the distribution chart.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryStat {
    pub category: String,
    pub sets: i64,
    pub volume: f64,
}

/// Expands sparse per-day rows into a dense series over [start, end].
/// Rows outside the window are ignored.
pub fn fill_daily(rows: &[DailyWorkoutRow], start: NaiveDate, end: NaiveDate) -> Vec<DailyStat> {
    let mut series = Vec::new();
    let mut day = start;
    while day <= end {
        let stat = match rows.iter().find(|r| r.date == day) {
            Some(row) => DailyStat {
                date: day,
                workouts: row.workouts,
                sets: row.sets,
                volume: row.volume,
            },
            None => DailyStat {
                date: day,
                workouts: 0,
                sets: 0,
                volume: 0.0,
            },
        };
        series.push(stat);
        day += Duration::days(1);
    }
    series
}
