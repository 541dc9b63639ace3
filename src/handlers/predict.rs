//! Prediction handler

use std::collections::HashMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::scoring::decision::{self, Decision, RiskTier};
use crate::scoring::validate;
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    /// Client record: feature name to numeric value. Extra keys beyond the
    /// schema are tolerated and dropped.
    pub data: HashMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub probability: f64,
    pub decision: Decision,
    pub threshold: f64,
    pub risk_level: RiskTier,
    pub message: String,
}

/// Score one client record and derive the loan decision
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictionRequest>,
) -> AppResult<Json<PredictionResponse>> {
    let artifacts = &state.artifacts;

    // Completeness check runs before touching the model
    let row = validate::build_row(&artifacts.feature_names, &req.data)
        .map_err(AppError::missing_features)?;

    let probability = artifacts
        .scorer
        .score(&row)
        .map_err(|e| AppError::ScoringError(e.to_string()))?;

    let decision = decision::decide(probability, artifacts.threshold);
    let risk_level = decision::risk_tier(probability);
    let message = decision::message(decision, probability);

    Ok(Json(PredictionResponse {
        probability,
        decision,
        threshold: artifacts.threshold,
        risk_level,
        message,
    }))
}
