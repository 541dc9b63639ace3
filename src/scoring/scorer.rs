//! Scoring engine - ONNX Runtime integration
//!
//! The model is treated as an opaque function: one feature row in training
//! order goes in, one default probability comes out.

use ndarray::Array2;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;
use parking_lot::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("model session error: {0}")]
    Session(String),

    #[error("invalid model output: {0}")]
    Output(String),
}

/// Opaque scoring function over a single feature row.
pub trait Scorer: Send + Sync {
    /// Score one row (values in training column order) and return the
    /// positive-class probability in [0, 1].
    fn score(&self, row: &[f32]) -> Result<f64, ScoreError>;
}

/// ONNX Runtime backed scorer.
///
/// `Session::run` needs `&mut self`, so concurrent requests serialize on the
/// session mutex; the lock is held for one inference only.
pub struct OnnxScorer {
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxScorer {
    /// Load the model from file.
    pub fn load(model_path: &str) -> Result<Self, ScoreError> {
        tracing::info!("Loading ONNX model from: {}", model_path);

        if !std::path::Path::new(model_path).exists() {
            return Err(ScoreError::Session(format!("model not found: {}", model_path)));
        }

        let session = Session::builder()
            .map_err(|e| ScoreError::Session(format!("failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ScoreError::Session(format!("failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ScoreError::Session(format!("failed to load model: {}", e)))?;

        // Classifier graphs exported from sklearn-style converters put the
        // probability tensor last (after the label output).
        let output_name = session
            .outputs
            .last()
            .map(|o| o.name.clone())
            .ok_or_else(|| ScoreError::Output("model has no outputs".to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            output_name,
        })
    }
}

impl Scorer for OnnxScorer {
    fn score(&self, row: &[f32]) -> Result<f64, ScoreError> {
        let input_array = Array2::<f32>::from_shape_vec((1, row.len()), row.to_vec())
            .map_err(|e| ScoreError::Session(format!("array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ScoreError::Session(format!("tensor error: {}", e)))?;

        let mut session = self.session.lock();

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ScoreError::Session(format!("inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| ScoreError::Output(format!("missing output {}", self.output_name)))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ScoreError::Output(format!("extract error: {}", e)))?;

        // Positive (default) class is the last probability column.
        let proba = output_tensor
            .1
            .last()
            .copied()
            .ok_or_else(|| ScoreError::Output("empty probability tensor".to_string()))?;

        Ok(f64::from(proba).clamp(0.0, 1.0))
    }
}
