use axum::{Json, extract::State, http::StatusCode};
use serde_json::Value;

use quill_core::health::readiness;

use crate::state::AppState;

/// `GET /readyz`: 200 only when both Postgres and Redis answer.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "database readiness check failed");
            false
        }
    };
    let redis = match state.redis.get().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "redis readiness check failed");
            false
        }
    };
    readiness(&[("database", database), ("redis", redis)])
}
