pub mod chat;
pub mod notes;
pub mod papers;
pub mod plans;
pub mod profile;
pub mod quizzes;

use axum::Json;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
