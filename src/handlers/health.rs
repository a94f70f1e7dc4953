use axum::response::Json;
use serde_json::{json, Value};
use tracing::info;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "UP" }))
}

pub async fn ping() -> Json<Value> {
    info!("Ping!");
    Json(json!({ "message": "Pong!" }))
}
