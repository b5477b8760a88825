use crate::domain::motivation::MotivationEngine;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub session_key: Vec<u8>,
    pub motivation: MotivationEngine,
}

pub type SharedState = Arc<AppState>;
