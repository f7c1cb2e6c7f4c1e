use axum::Json;
use serde_json::{json, Value};

/// Liveness probe. Does not touch storage or the processing function.
pub async fn health() -> Json<Value> {
    Json(json!({ "API": "Healthy" }))
}
