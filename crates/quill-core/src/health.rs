use axum::Json;
use axum::http::StatusCode;
use serde_json::{Map, Value};

/// Handler for `GET /healthz` (liveness).
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Build a readiness response from named dependency checks.
///
/// 200 when every check passed, 503 otherwise. Body: `{"checks": {"<name>": "ok" | "unavailable"}}`.
pub fn readiness(checks: &[(&'static str, bool)]) -> (StatusCode, Json<Value>) {
    let mut map = Map::new();
    for (name, ok) in checks {
        let state = if *ok { "ok" } else { "unavailable" };
        map.insert((*name).to_owned(), Value::from(state));
    }
    let status = if checks.iter().all(|(_, ok)| *ok) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(serde_json::json!({ "checks": map })))
}
