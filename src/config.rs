//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Path to the serialized model (ONNX)
    pub model_path: String,

    /// Path to the ordered feature-name list (JSON array)
    pub feature_names_path: String,

    /// Path to the model metadata document (JSON object)
    pub model_info_path: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "artifacts/model.onnx".to_string()),

            feature_names_path: env::var("FEATURE_NAMES_PATH")
                .unwrap_or_else(|_| "artifacts/feature_names.json".to_string()),

            model_info_path: env::var("MODEL_INFO_PATH")
                .unwrap_or_else(|_| "artifacts/model_info.json".to_string()),
        }
    }
}
