//! Credit Risk API Server
//!
//! HTTP service exposing a pre-trained credit-default classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   CREDIT RISK API                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌────────────┐   ┌────────────────────┐  │
//! │  │  Router  │──▶│ Validation │──▶│  Scoring (ONNX)    │  │
//! │  │  (Axum)  │   │ + Decision │   │  loaded at startup │  │
//! │  └──────────┘   └────────────┘   └────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! All artifacts (model, feature schema, metadata) load once before the
//! server binds; request handling is stateless.

mod artifacts;
mod config;
mod error;
mod handlers;
mod scoring;

use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "credit_risk_api=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Credit Risk API starting...");

    // Load artifacts - fatal if anything is missing or corrupt
    let artifacts = artifacts::Artifacts::load(&config)
        .expect("Failed to load model artifacts");

    // Build application state
    let state = AppState {
        artifacts: Arc::new(artifacts),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<artifacts::Artifacts>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root::index))
        .route("/health", get(handlers::health::check))
        .route("/model-info", get(handlers::model_info::get))
        .route("/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::Artifacts;
    use crate::scoring::scorer::{ScoreError, Scorer};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Map, Value};
    use tower::ServiceExt;

    /// Stub scorer returning a fixed probability
    struct FixedScorer(f64);

    impl Scorer for FixedScorer {
        fn score(&self, _row: &[f32]) -> Result<f64, ScoreError> {
            Ok(self.0)
        }
    }

    /// Stub scorer that always fails
    struct FailingScorer;

    impl Scorer for FailingScorer {
        fn score(&self, _row: &[f32]) -> Result<f64, ScoreError> {
            Err(ScoreError::Output("shape mismatch".to_string()))
        }
    }

    fn feature_names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("FEATURE_{}", i)).collect()
    }

    fn test_state(n_features: usize, threshold: f64, scorer: Arc<dyn Scorer>) -> AppState {
        AppState {
            artifacts: Arc::new(Artifacts {
                feature_names: feature_names(n_features),
                model_info: json!({
                    "model_type": "LightGBM",
                    "auc_test": 0.78,
                    "optimal_threshold": threshold
                }),
                threshold,
                scorer,
            }),
        }
    }

    /// Record carrying every schema feature
    fn full_record(n_features: usize) -> Value {
        let map: Map<String, Value> = feature_names(n_features)
            .into_iter()
            .map(|name| (name, json!(0.5)))
            .collect();
        Value::Object(map)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn predict_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_loaded_model() {
        let app = create_router(test_state(85, 0.35, Arc::new(FixedScorer(0.1))));

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model_loaded"], true);
        assert_eq!(body["n_features"], 85);
        assert_eq!(body["optimal_threshold"], 0.35);
    }

    #[tokio::test]
    async fn root_lists_endpoints() {
        let app = create_router(test_state(10, 0.35, Arc::new(FixedScorer(0.1))));

        let response = app.oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["endpoints"].get("/health").is_some());
        assert!(body["endpoints"].get("/predict").is_some());
        assert!(body["endpoints"].get("/model-info").is_some());
    }

    #[tokio::test]
    async fn model_info_returns_metadata_verbatim() {
        let app = create_router(test_state(10, 0.35, Arc::new(FixedScorer(0.1))));

        let response = app.oneshot(get_request("/model-info")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["model_type"], "LightGBM");
        assert_eq!(body["auc_test"], 0.78);
        assert_eq!(body["optimal_threshold"], 0.35);
    }

    #[tokio::test]
    async fn predict_low_risk_is_accepted() {
        let app = create_router(test_state(85, 0.35, Arc::new(FixedScorer(0.12))));

        let response = app
            .oneshot(predict_request(json!({ "data": full_record(85) })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["probability"], 0.12);
        assert_eq!(body["decision"], "ACCORDÉ");
        assert_eq!(body["threshold"], 0.35);
        assert_eq!(body["risk_level"], "FAIBLE");
        assert_eq!(body["message"], "Crédit accordé. Risque de défaut : 12.0%");
    }

    #[tokio::test]
    async fn predict_at_threshold_is_rejected() {
        let app = create_router(test_state(5, 0.35, Arc::new(FixedScorer(0.35))));

        let response = app
            .oneshot(predict_request(json!({ "data": full_record(5) })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["decision"], "REFUSÉ");
        assert_eq!(body["risk_level"], "MODÉRÉ");
        assert_eq!(body["message"], "Crédit refusé. Risque de défaut trop élevé : 35.0%");
    }

    #[tokio::test]
    async fn predict_missing_features_is_400() {
        let app = create_router(test_state(85, 0.35, Arc::new(FixedScorer(0.1))));

        // Only 1 of 85 required features
        let response = app
            .oneshot(predict_request(json!({ "data": { "FEATURE_0": 1.0 } })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["missing_count"], 84);
        // Diagnostic sample is capped at 10 names
        assert_eq!(body["missing_features"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn predict_malformed_body_is_422() {
        let app = create_router(test_state(85, 0.35, Arc::new(FixedScorer(0.1))));

        // No "data" wrapper key
        let response = app
            .oneshot(predict_request(json!({ "wrong_field": { "FEATURE_0": 0.5 } })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn predict_ignores_extra_fields() {
        let state = test_state(5, 0.35, Arc::new(FixedScorer(0.2)));

        let response = create_router(state.clone())
            .oneshot(predict_request(json!({ "data": full_record(5) })))
            .await
            .unwrap();
        let baseline = body_json(response).await;

        let mut record = full_record(5);
        record["SOME_UNKNOWN_FEATURE"] = json!(42.0);
        record["ANOTHER_ONE"] = json!(-1.0);
        let response = create_router(state)
            .oneshot(predict_request(json!({ "data": record })))
            .await
            .unwrap();
        let with_extras = body_json(response).await;

        assert_eq!(baseline, with_extras);
    }

    #[tokio::test]
    async fn predict_is_deterministic() {
        let state = test_state(5, 0.35, Arc::new(FixedScorer(0.42)));
        let request_body = json!({ "data": full_record(5) });

        let first = body_json(
            create_router(state.clone())
                .oneshot(predict_request(request_body.clone()))
                .await
                .unwrap(),
        )
        .await;
        let second = body_json(
            create_router(state)
                .oneshot(predict_request(request_body))
                .await
                .unwrap(),
        )
        .await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn predict_scoring_failure_is_500() {
        let app = create_router(test_state(5, 0.35, Arc::new(FailingScorer)));

        let response = app
            .oneshot(predict_request(json!({ "data": full_record(5) })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("shape mismatch"));
    }
}
