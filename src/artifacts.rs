//! Artifact loading - model, feature schema, metadata
//!
//! All three artifacts are read once at process start. Any missing or
//! malformed artifact aborts startup before the server binds.

use std::fs;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::config::Config;
use crate::scoring::scorer::{OnnxScorer, Scorer};

/// Immutable process-wide artifacts, shared read-only by every handler.
pub struct Artifacts {
    /// Ordered feature names; defines the required input set and the exact
    /// column order the model was trained on
    pub feature_names: Vec<String>,

    /// Raw metadata document, returned verbatim by `/model-info`
    pub model_info: Value,

    /// Operating threshold extracted from the metadata
    pub threshold: f64,

    /// Opaque scoring function
    pub scorer: Arc<dyn Scorer>,
}

impl Artifacts {
    /// Load all artifacts. Fail-fast: the first broken artifact is fatal.
    pub fn load(config: &Config) -> Result<Self> {
        let scorer = OnnxScorer::load(&config.model_path)
            .with_context(|| format!("failed to load model from {}", config.model_path))?;
        tracing::info!("Model loaded");

        let feature_names = load_feature_names(&config.feature_names_path)?;
        tracing::info!("{} features loaded", feature_names.len());

        let (model_info, threshold) = load_model_info(&config.model_info_path)?;
        tracing::info!("Metadata loaded, optimal threshold: {}", threshold);

        Ok(Self {
            feature_names,
            model_info,
            threshold,
            scorer: Arc::new(scorer),
        })
    }
}

fn load_feature_names(path: &str) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read feature names from {}", path))?;

    let feature_names: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("feature names in {} are not a JSON string array", path))?;

    if feature_names.is_empty() {
        bail!("feature list in {} is empty", path);
    }

    Ok(feature_names)
}

fn load_model_info(path: &str) -> Result<(Value, f64)> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read model info from {}", path))?;

    let model_info: Value = serde_json::from_str(&raw)
        .with_context(|| format!("model info in {} is not valid JSON", path))?;

    let threshold = model_info
        .get("optimal_threshold")
        .and_then(Value::as_f64)
        .with_context(|| format!("model info in {} has no numeric optimal_threshold", path))?;

    if !(0.0..=1.0).contains(&threshold) {
        bail!("optimal_threshold {} is outside [0, 1]", threshold);
    }

    Ok((model_info, threshold))
}
