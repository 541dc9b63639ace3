//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    n_features: usize,
    optimal_threshold: f64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        // The process does not start without a loaded model
        model_loaded: true,
        n_features: state.artifacts.feature_names.len(),
        optimal_threshold: state.artifacts.threshold,
    })
}
