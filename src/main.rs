//! NetShield Inference API
//!
//! Backend for the NetShield traffic-classification dashboard. Loads one
//! pre-trained ONNX classifier (attack vs. benign network traffic) at
//! startup and serves it over a small JSON API:
//!
//! ```text
//! request → preprocessing (identity) → model inference → confidence scaling → JSON
//! ```
//!
//! The model is read-only after load; every request runs exactly one
//! synchronous inference call.

mod config;
mod dataset;
mod error;
mod handlers;
mod model;
mod preprocess;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{ApiError, ApiResult};
use model::{Classifier, OnnxClassifier};
use preprocess::{Identity, Preprocess};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "netshield_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("NetShield Inference API starting...");

    // A model that fails to load is fatal; no request is served without it.
    let classifier =
        OnnxClassifier::load(&config.model_path).expect("Failed to load classifier model");
    tracing::info!("Model ready: {}", config.model_path.display());

    // Build application state
    let state = AppState {
        classifier: Arc::new(classifier),
        preprocess: Arc::new(Identity),
        config: config.clone(),
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
    pub classifier: Arc<dyn Classifier>,
    pub preprocess: Arc<dyn Preprocess>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::check))
        .route("/api/predict", post(handlers::predict::predict))
        .route("/api/predict-random", get(handlers::predict::predict_random))
        .route("/api/performance", get(handlers::reports::performance))
        .route("/api/comparison", get(handlers::reports::comparison))
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
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use std::io::Write;
    use std::path::PathBuf;
    use tower::ServiceExt;

    use crate::model::{ClassProbs, InferenceError};

    /// Mock classifier returning a fixed probability pair
    struct FixedClassifier(ClassProbs);

    impl Classifier for FixedClassifier {
        fn class_probs(&self, _features: &[f32]) -> Result<ClassProbs, InferenceError> {
            Ok(self.0)
        }
    }

    /// Mock classifier that always fails
    struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn class_probs(&self, _features: &[f32]) -> Result<ClassProbs, InferenceError> {
            Err(InferenceError("Inference backend unavailable".to_string()))
        }
    }

    fn test_app(classifier: Arc<dyn Classifier>, test_data_dir: PathBuf) -> Router {
        create_router(AppState {
            classifier,
            preprocess: Arc::new(Identity),
            config: config::Config {
                model_path: PathBuf::from("model/model.onnx"),
                test_data_dir,
                port: 0,
            },
        })
    }

    fn fixed_app(benign: f32, attack: f32) -> Router {
        test_app(
            Arc::new(FixedClassifier(ClassProbs { benign, attack })),
            PathBuf::from("datasets/test"),
        )
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_returns_fixed_status() {
        let (status, body) = get_json(fixed_app(0.5, 0.5), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Model loaded successfully");
    }

    #[tokio::test]
    async fn test_predict_attack() {
        let (status, body) = post_json(
            fixed_app(0.2, 0.8),
            "/api/predict",
            r#"{"data": [[0.1, 0.2, 0.3]]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"]["class"], "Attack");
        assert_eq!(body["prediction"]["attack_confidence"], 80.0);
        assert_eq!(body["prediction"]["benign_confidence"], 20.0);
    }

    #[tokio::test]
    async fn test_predict_accepts_flat_vector() {
        let (status, body) = post_json(
            fixed_app(0.9, 0.1),
            "/api/predict",
            r#"{"data": [0.1, 0.2, 0.3]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"]["class"], "Benign");
    }

    #[tokio::test]
    async fn test_predict_tie_is_benign() {
        let (status, body) =
            post_json(fixed_app(0.5, 0.5), "/api/predict", r#"{"data": [[1.0]]}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"]["class"], "Benign");
        assert_eq!(body["prediction"]["attack_confidence"], 50.0);
    }

    #[tokio::test]
    async fn test_predict_malformed_body_is_bad_request() {
        let (status, body) =
            post_json(fixed_app(0.5, 0.5), "/api/predict", r#"{"data": "nope"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert!(body.get("prediction").is_none());
    }

    #[tokio::test]
    async fn test_predict_empty_data_is_bad_request() {
        let (status, body) =
            post_json(fixed_app(0.5, 0.5), "/api/predict", r#"{"data": []}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_predict_inference_failure_is_server_error() {
        let app = test_app(Arc::new(FailingClassifier), PathBuf::from("datasets/test"));
        let (status, body) = post_json(app, "/api/predict", r#"{"data": [[1.0]]}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Inference backend unavailable");
        assert!(body.get("prediction").is_none());
    }

    #[tokio::test]
    async fn test_predict_random_returns_true_label() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("flows.csv")).unwrap();
        writeln!(file, "duration,pkt_count,label").unwrap();
        writeln!(file, "1.5,42,1").unwrap();

        let app = test_app(
            Arc::new(FixedClassifier(ClassProbs {
                benign: 0.1,
                attack: 0.9,
            })),
            dir.path().to_path_buf(),
        );

        let (status, body) = get_json(app, "/api/predict-random").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["true_label"]["class"], "Attack");
        assert_eq!(body["prediction"]["class"], "Attack");
        assert_eq!(body["prediction"]["attack_confidence"], 90.0);
    }

    #[tokio::test]
    async fn test_predict_random_missing_directory_is_server_error() {
        let app = test_app(
            Arc::new(FixedClassifier(ClassProbs {
                benign: 0.5,
                attack: 0.5,
            })),
            PathBuf::from("/nonexistent/test-data"),
        );

        let (status, body) = get_json(app, "/api/predict-random").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_performance_is_idempotent() {
        let (status, first) = get_json(fixed_app(0.5, 0.5), "/api/performance").await;
        let (_, second) = get_json(fixed_app(0.5, 0.5), "/api/performance").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, second);
        assert_eq!(first["balanced_accuracy"], 99.91);
        assert_eq!(first["confusion_matrix"][0][0], 15894);
    }

    #[tokio::test]
    async fn test_comparison_is_idempotent() {
        let (status, first) = get_json(fixed_app(0.5, 0.5), "/api/comparison").await;
        let (_, second) = get_json(fixed_app(0.5, 0.5), "/api/comparison").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, second);
        assert_eq!(first["base_paper"]["claimed_accuracy"], 98.2);
        assert_eq!(first["our_model"]["advantages"].as_array().unwrap().len(), 4);
    }
}
