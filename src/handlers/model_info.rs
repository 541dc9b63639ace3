//! Model metadata handler

use axum::{extract::State, Json};
use serde_json::Value;

use crate::AppState;

/// Return the loaded metadata document verbatim
pub async fn get(State(state): State<AppState>) -> Json<Value> {
    Json(state.artifacts.model_info.clone())
}
