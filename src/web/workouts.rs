use crate::db::{self, NewWorkoutSet, WorkoutWithSets};
use crate::state::SharedState;
use crate::web::session::UserSession;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct CreateWorkoutRequest {
    pub date: NaiveDate,
    pub sets: Vec<NewWorkoutSet>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Deserialize)]
pub struct LastSetQuery {
    pub exercise_id: Uuid,
}

#[derive(Serialize)]
pub struct LastSetResponse {
    pub weight: Option<f64>,
    pub reps: Option<i32>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", post(create_workout))
        .route("/", get(list_workouts))
        .route("/last-set", get(last_set))
        .route("/:id", delete(delete_workout))
        .with_state(state)
}

async fn create_workout(
    UserSession(user_id): UserSession,
    State(state): State<SharedState>,
    Json(payload): Json<CreateWorkoutRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if payload.sets.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    if payload
        .sets
        .iter()
        .any(|s| s.weight < 0.0 || s.reps < 0 || s.set_number < 1)
    {
        return Err(StatusCode::BAD_REQUEST);
    }

    let total_volume: f64 = payload
        .sets
        .iter()
        .map(|s| s.weight * f64::from(s.reps))
        .sum();

    let workout_id = db::insert_workout(
        &state.pool,
        user_id,
        payload.date,
        total_volume,
        &payload.sets,
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to create workout: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let workout = db::get_workout_with_sets(&state.pool, workout_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok((StatusCode::CREATED, Json(workout)))
}

async fn list_workouts(
    UserSession(user_id): UserSession,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<WorkoutWithSets>>, StatusCode> {
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);

    let workouts = db::list_workouts(&state.pool, user_id, limit, offset)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list workouts: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(workouts))
}

async fn delete_workout(
    UserSession(user_id): UserSession,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let owner = db::workout_owner(&state.pool, id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    if owner != user_id {
        return Err(StatusCode::FORBIDDEN);
    }

    db::delete_workout(&state.pool, id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete workout {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn last_set(
    UserSession(user_id): UserSession,
    State(state): State<SharedState>,
    Query(query): Query<LastSetQuery>,
) -> Result<Json<LastSetResponse>, StatusCode> {
    let last = db::last_set_for_exercise(&state.pool, user_id, query.exercise_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let (weight, reps) = match last {
        Some((weight, reps)) => (Some(weight), Some(reps)),
        None => (None, None),
    };
    Ok(Json(LastSetResponse { weight, reps }))
}
