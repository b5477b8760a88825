pub mod seed;

use crate::analytics::progress::WindowSnapshot;
use crate::analytics::trends::{CategoryStat, DailyWorkoutRow};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub email: String,
    pub hash: String,
    pub name: String,
    pub height: Option<f64>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub goal_weight: Option<f64>,
    pub goal_date: Option<NaiveDate>,
    pub goal_purpose: Option<String>,
    pub weekly_goal: i32,
    pub default_unit: String,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub name: String,
    pub name_en: String,
    pub category: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub total_volume: f64,
}

/// One set joined with its exercise, as returned to the client.
#[derive(Debug, Serialize, FromRow)]
pub struct WorkoutSetDetail {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub exercise_id: Uuid,
    pub exercise_name: String,
    pub exercise_category: String,
    pub set_number: i32,
    pub weight: f64,
    pub reps: i32,
    pub rpe: Option<i32>,
    pub is_completed: bool,
    pub memo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutWithSets {
    #[serde(flatten)]
    pub workout: WorkoutRecord,
    pub sets: Vec<WorkoutSetDetail>,
}

/// Incoming set payload for workout creation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewWorkoutSet {
    pub exercise_id: Uuid,
    pub set_number: i32,
    pub weight: f64,
    pub reps: i32,
    pub rpe: Option<i32>,
    #[serde(default = "default_true")]
    pub is_completed: bool,
    pub memo: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Profile fields writable through the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub height: Option<f64>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub goal_weight: Option<f64>,
    pub goal_date: Option<NaiveDate>,
    pub goal_purpose: Option<String>,
    pub weekly_goal: Option<i32>,
    pub default_unit: Option<String>,
    pub timezone: Option<String>,
}

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn insert_user(pool: &PgPool, name: &str, email: &str, hash: &str) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, email, hash, name) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(email)
        .bind(hash)
        .bind(name)
        .execute(pool)
        .await?;
    Ok(id)
}

/// Applies a partial profile update. Weekly goal arrives pre-clamped by
/// the handler (>= 1).
pub async fn update_profile(pool: &PgPool, user_id: Uuid, update: &ProfileUpdate) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE users SET
            name = COALESCE($2, name),
            height = COALESCE($3, height),
            gender = COALESCE($4, gender),
            birth_date = COALESCE($5, birth_date),
            goal_weight = COALESCE($6, goal_weight),
            goal_date = COALESCE($7, goal_date),
            goal_purpose = COALESCE($8, goal_purpose),
            weekly_goal = COALESCE($9, weekly_goal),
            default_unit = COALESCE($10, default_unit),
            timezone = COALESCE($11, timezone)
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(update.name.as_deref())
    .bind(update.height)
    .bind(update.gender.as_deref())
    .bind(update.birth_date)
    .bind(update.goal_weight)
    .bind(update.goal_date)
    .bind(update.goal_purpose.as_deref())
    .bind(update.weekly_goal)
    .bind(update.default_unit.as_deref())
    .bind(update.timezone.as_deref())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list_exercises(pool: &PgPool) -> Result<Vec<ExerciseRecord>> {
    let exercises =
        sqlx::query_as::<_, ExerciseRecord>("SELECT * FROM exercises ORDER BY category, name")
            .fetch_all(pool)
            .await?;
    Ok(exercises)
}

/// Inserts a workout and its sets in one transaction.
pub async fn insert_workout(
    pool: &PgPool,
    user_id: Uuid,
    date: NaiveDate,
    total_volume: f64,
    sets: &[NewWorkoutSet],
) -> Result<Uuid> {
    let workout_id = Uuid::new_v4();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO workouts (id, user_id, date, started_at, ended_at, total_volume)
        VALUES ($1, $2, $3, NOW(), NOW(), $4)
        "#,
    )
    .bind(workout_id)
    .bind(user_id)
    .bind(date)
    .bind(total_volume)
    .execute(&mut *tx)
    .await?;

    for set in sets {
        sqlx::query(
            r#"
            INSERT INTO workout_sets
                (id, workout_id, exercise_id, set_number, weight, reps, rpe, is_completed, memo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(workout_id)
        .bind(set.exercise_id)
        .bind(set.set_number)
        .bind(set.weight)
        .bind(set.reps)
        .bind(set.rpe)
        .bind(set.is_completed)
        .bind(set.memo.as_deref())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(workout_id)
}

pub async fn get_workout_with_sets(
    pool: &PgPool,
    workout_id: Uuid,
) -> Result<Option<WorkoutWithSets>> {
    let workout = sqlx::query_as::<_, WorkoutRecord>("SELECT * FROM workouts WHERE id = $1")
        .bind(workout_id)
        .fetch_optional(pool)
        .await?;
    let Some(workout) = workout else {
        return Ok(None);
    };

    let sets = sets_for_workouts(pool, &[workout_id]).await?;
    Ok(Some(WorkoutWithSets { workout, sets }))
}

/// Newest-first listing with sets and exercise info attached.
pub async fn list_workouts(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<WorkoutWithSets>> {
    let workouts = sqlx::query_as::<_, WorkoutRecord>(
        "SELECT * FROM workouts WHERE user_id = $1 ORDER BY date DESC, started_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let ids: Vec<Uuid> = workouts.iter().map(|w| w.id).collect();
    let mut sets = sets_for_workouts(pool, &ids).await?;

    let mut result = Vec::with_capacity(workouts.len());
    for workout in workouts {
        let (own, rest): (Vec<_>, Vec<_>) =
            sets.into_iter().partition(|s| s.workout_id == workout.id);
        sets = rest;
        result.push(WorkoutWithSets { workout, sets: own });
    }
    Ok(result)
}

async fn sets_for_workouts(pool: &PgPool, workout_ids: &[Uuid]) -> Result<Vec<WorkoutSetDetail>> {
    if workout_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sets = sqlx::query_as::<_, WorkoutSetDetail>(
        r#"
        SELECT s.id, s.workout_id, s.exercise_id,
               e.name AS exercise_name, e.category AS exercise_category,
               s.set_number, s.weight, s.reps, s.rpe, s.is_completed, s.memo
        FROM workout_sets s
        JOIN exercises e ON e.id = s.exercise_id
        WHERE s.workout_id = ANY($1)
        ORDER BY s.set_number
        "#,
    )
    .bind(workout_ids)
    .fetch_all(pool)
    .await?;
    Ok(sets)
}

pub async fn workout_owner(pool: &PgPool, workout_id: Uuid) -> Result<Option<Uuid>> {
    let owner: Option<Uuid> = sqlx::query_scalar("SELECT user_id FROM workouts WHERE id = $1")
        .bind(workout_id)
        .fetch_optional(pool)
        .await?;
    Ok(owner)
}

/// Sets go with the workout (ON DELETE CASCADE).
pub async fn delete_workout(pool: &PgPool, workout_id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM workouts WHERE id = $1")
        .bind(workout_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn last_set_for_exercise(
    pool: &PgPool,
    user_id: Uuid,
    exercise_id: Uuid,
) -> Result<Option<(f64, i32)>> {
    let row = sqlx::query(
        r#"
        SELECT s.weight, s.reps
        FROM workout_sets s
        JOIN workouts w ON w.id = s.workout_id
        WHERE w.user_id = $1 AND s.exercise_id = $2
        ORDER BY w.date DESC, s.set_number DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(exercise_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some((row.try_get("weight")?, row.try_get("reps")?))),
        None => Ok(None),
    }
}

/// The persistence contract of the stats core: every workout date of the
/// user, unordered.
pub async fn list_workout_dates(pool: &PgPool, user_id: Uuid) -> Result<Vec<NaiveDate>> {
    let dates: Vec<NaiveDate> = sqlx::query_scalar("SELECT date FROM workouts WHERE user_id = $1")
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(dates)
}

#[derive(Debug, FromRow)]
pub struct WeeklyTotals {
    pub workouts: i64,
    pub sets: i64,
    pub volume: f64,
}

pub async fn weekly_totals(
    pool: &PgPool,
    user_id: Uuid,
    week_start: NaiveDate,
) -> Result<WeeklyTotals> {
    let totals = sqlx::query_as::<_, WeeklyTotals>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM workouts
              WHERE user_id = $1 AND date >= $2) AS workouts,
            (SELECT COUNT(*) FROM workout_sets s
              JOIN workouts w ON w.id = s.workout_id
              WHERE w.user_id = $1 AND w.date >= $2) AS sets,
            (SELECT COALESCE(SUM(total_volume), 0) FROM workouts
              WHERE user_id = $1 AND date >= $2) AS volume
        "#,
    )
    .bind(user_id)
    .bind(week_start)
    .fetch_one(pool)
    .await?;
    Ok(totals)
}

pub async fn daily_workout_rows(
    pool: &PgPool,
    user_id: Uuid,
    since: NaiveDate,
) -> Result<Vec<DailyWorkoutRow>> {
    let rows = sqlx::query(
        r#"
        SELECT w.date AS date,
               COUNT(DISTINCT w.id) AS workouts,
               COUNT(s.id) AS sets,
               COALESCE(SUM(s.weight * s.reps), 0) AS volume
        FROM workouts w
        LEFT JOIN workout_sets s ON s.workout_id = w.id
        WHERE w.user_id = $1 AND w.date >= $2
        GROUP BY w.date
        ORDER BY w.date
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(pool)
    .await?;

    let mut daily = Vec::with_capacity(rows.len());
    for row in rows {
        daily.push(DailyWorkoutRow {
            date: row.try_get("date")?,
            workouts: row.try_get("workouts")?,
            sets: row.try_get("sets")?,
            volume: row.try_get("volume")?,
        });
    }
    Ok(daily)
}

pub async fn category_stats(
    pool: &PgPool,
    user_id: Uuid,
    since: NaiveDate,
) -> Result<Vec<CategoryStat>> {
    let stats = sqlx::query_as::<_, CategoryStat>(
        r#"
        SELECT e.category AS category,
               COUNT(s.id) AS sets,
               COALESCE(SUM(s.weight * s.reps), 0) AS volume
        FROM workout_sets s
        JOIN workouts w ON w.id = s.workout_id
        JOIN exercises e ON e.id = s.exercise_id
        WHERE w.user_id = $1 AND w.date >= $2
        GROUP BY e.category
        ORDER BY sets DESC
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(pool)
    .await?;
    Ok(stats)
}

/// Window aggregate for progress deltas; None when the window holds no
/// workouts.
pub async fn workout_window_snapshot(
    pool: &PgPool,
    user_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Option<WindowSnapshot>> {
    let row = sqlx::query(
        r#"
        SELECT COALESCE(SUM(w.total_volume), 0) AS total_volume,
               COALESCE(AVG(t.top_weight), 0) AS avg_top_weight,
               COUNT(DISTINCT w.date) AS active_days
        FROM workouts w
        LEFT JOIN (
            SELECT workout_id, MAX(weight) AS top_weight
            FROM workout_sets
            GROUP BY workout_id
        ) t ON t.workout_id = w.id
        WHERE w.user_id = $1 AND w.date >= $2 AND w.date < $3
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    let active_days: i64 = row.try_get("active_days")?;
    if active_days == 0 {
        return Ok(None);
    }
    Ok(Some(WindowSnapshot {
        total_volume: row.try_get("total_volume")?,
        avg_top_weight: row.try_get("avg_top_weight")?,
        active_days,
    }))
}
