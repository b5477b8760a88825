use crate::db::{self, ExerciseRecord};
use crate::state::SharedState;
use crate::web::session::UserSession;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(list_exercises))
        .with_state(state)
}

async fn list_exercises(
    UserSession(_user_id): UserSession,
    State(state): State<SharedState>,
) -> Result<Json<Vec<ExerciseRecord>>, StatusCode> {
    let exercises = db::list_exercises(&state.pool).await.map_err(|e| {
        tracing::error!("Failed to list exercises: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(exercises))
}
