pub mod auth;
pub mod exercises;
pub mod profile;
pub mod session;
pub mod stats;
pub mod workouts;

use crate::state::SharedState;
use axum::{routing::get, Router};

async fn health() -> &'static str {
    "OK"
}

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth::router(state.clone()))
        .nest("/profile", profile::router(state.clone()))
        .nest("/exercises", exercises::router(state.clone()))
        .nest("/workouts", workouts::router(state.clone()))
        .nest("/stats", stats::router(state))
}
