use crate::analytics::progress;
use crate::analytics::trends::{self, CategoryStat, DailyStat, TrendRange};
use crate::db;
use crate::domain::motivation::{MotivationalMessage, WorkoutCompletionStats};
use crate::domain::stats::{compute_stats, start_of_week, WorkoutStats};
use crate::state::SharedState;
use crate::time_utils;
use crate::web::session::UserSession;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize)]
pub struct WeeklyStatsResponse {
    pub workouts_this_week: i64,
    pub total_sets: i64,
    pub total_volume: f64,
    pub weekly_goal: i32,
    pub achievement_rate: u32,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub total_workouts: u32,
    pub workouts_this_week: u32,
    pub streak_days: u32,
    pub achievement_rate: u32,
    pub last_workout_date: Option<NaiveDate>,
    pub average_workouts_per_week: f64,
}

#[derive(Deserialize)]
pub struct TrendsQuery {
    pub range: Option<String>,
}

#[derive(Serialize)]
pub struct TrendsResponse {
    pub range: TrendRange,
    pub daily: Vec<DailyStat>,
    pub categories: Vec<CategoryStat>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/weekly", get(weekly))
        .route("/summary", get(summary))
        .route("/motivation", get(motivation))
        .route("/completion-message", post(completion_message))
        .route("/progress-message", get(progress_message))
        .route("/trends", get(get_trends))
        .with_state(state)
}

/// Local calendar context for the user: date and hour in their stored
/// timezone, plus the clamped weekly goal.
async fn local_context(
    state: &SharedState,
    user_id: Uuid,
) -> Result<(NaiveDate, u32, u32), StatusCode> {
    let user = db::find_user_by_id(&state.pool, user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let (today, hour) = time_utils::local_date_and_hour(&user.timezone, Utc::now());
    Ok((today, hour, user.weekly_goal.max(1) as u32))
}

async fn user_stats(
    state: &SharedState,
    user_id: Uuid,
    weekly_goal: u32,
    today: NaiveDate,
) -> Result<WorkoutStats, StatusCode> {
    let dates = db::list_workout_dates(&state.pool, user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load workout dates: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(compute_stats(&dates, weekly_goal, today))
}

fn achievement_rate(workouts_this_week: u32, weekly_goal: u32) -> u32 {
    if weekly_goal == 0 {
        return 0;
    }
    (f64::from(workouts_this_week) / f64::from(weekly_goal) * 100.0).round() as u32
}

async fn weekly(
    UserSession(user_id): UserSession,
    State(state): State<SharedState>,
) -> Result<Json<WeeklyStatsResponse>, StatusCode> {
    let (today, _, weekly_goal) = local_context(&state, user_id).await?;
    let totals = db::weekly_totals(&state.pool, user_id, start_of_week(today))
        .await
        .map_err(|e| {
            tracing::error!("Failed to load weekly totals: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(WeeklyStatsResponse {
        workouts_this_week: totals.workouts,
        total_sets: totals.sets,
        total_volume: totals.volume,
        weekly_goal: weekly_goal as i32,
        achievement_rate: achievement_rate(totals.workouts.max(0) as u32, weekly_goal),
    }))
}

async fn summary(
    UserSession(user_id): UserSession,
    State(state): State<SharedState>,
) -> Result<Json<SummaryResponse>, StatusCode> {
    let (today, _, weekly_goal) = local_context(&state, user_id).await?;
    let stats = user_stats(&state, user_id, weekly_goal, today).await?;

    Ok(Json(SummaryResponse {
        total_workouts: stats.total_workouts,
        workouts_this_week: stats.workouts_this_week,
        streak_days: stats.streak_days,
        achievement_rate: achievement_rate(stats.workouts_this_week, stats.weekly_goal),
        last_workout_date: stats.last_workout_date,
        average_workouts_per_week: stats.average_workouts_per_week,
    }))
}

/// The full pipeline: stats snapshot -> classifier -> selector. The
/// client renders message and emoji as-is.
async fn motivation(
    UserSession(user_id): UserSession,
    State(state): State<SharedState>,
) -> Result<Json<MotivationalMessage>, StatusCode> {
    let (today, hour, weekly_goal) = local_context(&state, user_id).await?;
    let stats = user_stats(&state, user_id, weekly_goal, today).await?;

    let mut rng = rand::thread_rng();
    Ok(Json(state.motivation.generate(&stats, hour, &mut rng)))
}

async fn completion_message(
    UserSession(_user_id): UserSession,
    State(state): State<SharedState>,
    Json(payload): Json<WorkoutCompletionStats>,
) -> Result<Json<MotivationalMessage>, StatusCode> {
    let mut rng = rand::thread_rng();
    Ok(Json(state.motivation.completion_message(&payload, &mut rng)))
}

async fn progress_message(
    UserSession(user_id): UserSession,
    State(state): State<SharedState>,
) -> Result<Json<MotivationalMessage>, StatusCode> {
    let (today, _, _) = local_context(&state, user_id).await?;
    let delta = progress::build_progress_delta(&state.pool, user_id, today)
        .await
        .map_err(|e| {
            tracing::error!("Failed to build progress delta: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(state.motivation.progress_message(&delta)))
}

async fn get_trends(
    UserSession(user_id): UserSession,
    State(state): State<SharedState>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<TrendsResponse>, StatusCode> {
    let range = match query.range.as_deref() {
        Some(raw) => TrendRange::try_from(raw).map_err(|_| StatusCode::BAD_REQUEST)?,
        None => TrendRange::Month,
    };

    let (today, _, _) = local_context(&state, user_id).await?;
    let start = range.start(today);

    let rows = db::daily_workout_rows(&state.pool, user_id, start)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let categories = db::category_stats(&state.pool, user_id, start)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(TrendsResponse {
        range,
        daily: trends::fill_daily(&rows, start, today),
        categories,
    }))
}
