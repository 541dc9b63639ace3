//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Client input errors
    MissingFeatures { sample: Vec<String>, total: usize },

    // Scoring-time errors
    ScoringError(String),
}

impl AppError {
    /// Build a missing-features error from the full missing set.
    /// Only the first 10 names are echoed back; the count covers all of them.
    pub fn missing_features(missing: Vec<String>) -> Self {
        let total = missing.len();
        let sample = missing.into_iter().take(10).collect();
        AppError::MissingFeatures { sample, total }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingFeatures { sample, total } => {
                let body = Json(json!({
                    "error": format!("Features manquantes : {:?}... ({} au total)", sample, total),
                    "missing_features": sample,
                    "missing_count": total,
                    "status": 400
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::ScoringError(msg) => {
                tracing::error!("Scoring error: {}", msg);
                let body = Json(json!({
                    "error": format!("Erreur lors de la prédiction : {}", msg),
                    "status": 500
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
