use crate::db::{self, DbUser, ProfileUpdate};
use crate::state::SharedState;
use crate::web::session::UserSession;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub height: Option<f64>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub goal_weight: Option<f64>,
    pub goal_date: Option<NaiveDate>,
    pub goal_purpose: Option<String>,
    pub weekly_goal: i32,
    pub default_unit: String,
    pub timezone: String,
}

impl From<DbUser> for ProfileResponse {
    fn from(user: DbUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            height: user.height,
            gender: user.gender,
            birth_date: user.birth_date,
            goal_weight: user.goal_weight,
            goal_date: user.goal_date,
            goal_purpose: user.goal_purpose,
            weekly_goal: user.weekly_goal,
            default_unit: user.default_unit,
            timezone: user.timezone,
        }
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(get_profile))
        .route("/", put(update_profile))
        .with_state(state)
}

async fn get_profile(
    UserSession(user_id): UserSession,
    State(state): State<SharedState>,
) -> Result<Json<ProfileResponse>, StatusCode> {
    let user = db::find_user_by_id(&state.pool, user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(user.into()))
}

async fn update_profile(
    UserSession(user_id): UserSession,
    State(state): State<SharedState>,
    Json(mut payload): Json<ProfileUpdate>,
) -> Result<Json<ProfileResponse>, StatusCode> {
    // weekly goal is a divisor downstream, keep it positive
    if let Some(goal) = payload.weekly_goal {
        payload.weekly_goal = Some(goal.max(1));
    }
    if let Some(tz) = &payload.timezone {
        if tz.parse::<chrono_tz::Tz>().is_err() {
            return Err(StatusCode::BAD_REQUEST);
        }
    }

    db::update_profile(&state.pool, user_id, &payload)
        .await
        .map_err(|e| {
            tracing::error!("Profile update failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let user = db::find_user_by_id(&state.pool, user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(user.into()))
}
