//! HTTP API for the scoring stages
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /model - Classifier weights, bias and feature names
//! - POST /features - Extract a feature vector from an authentication context
//! - POST /predict - Classify a feature vector
//!
//! The biometric prompt is device-local, so the full verification flow is
//! not exposed here. These routes serve backend cross-checks and tooling.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::{FeatureExtractor, Perceptron};
use crate::types::{FeatureContext, FeatureIndex, FeatureVector};
use crate::LivenessError;

/// App state
pub struct AppState {
    pub perceptron: Perceptron,
    pub extractor: FeatureExtractor,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Model response
#[derive(Debug, Serialize)]
pub struct ModelResponse {
    pub features: Vec<&'static str>,
    pub weights: Vec<f64>,
    pub bias: f64,
}

/// Feature extraction request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesRequest {
    #[serde(flatten)]
    pub context: FeatureContext,
    /// Evaluation instant, defaults to server time
    pub now: Option<DateTime<Utc>>,
}

/// Feature extraction response
#[derive(Debug, Serialize)]
pub struct FeaturesResponse {
    pub features: FeatureVector,
}

/// Prediction request. Raw values: the length check happens in the classifier.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub features: Vec<f64>,
}

/// Prediction response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub confidence: f64,
    pub transport_score: u32,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Classifier rejections are the caller's bad input here, not a server defect
struct ApiError(LivenessError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::warn!("rejected request: {}", self.0);
        let body = Json(ErrorResponse { error: self.0.to_string() });
        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}

impl From<LivenessError> for ApiError {
    fn from(err: LivenessError) -> Self {
        Self(err)
    }
}

/// Create the API router with default weights
pub fn create_router() -> Router {
    create_router_with(Perceptron::new())
}

/// Create the API router around a given classifier
pub fn create_router_with(perceptron: Perceptron) -> Router {
    let state = Arc::new(AppState {
        perceptron,
        extractor: FeatureExtractor::new(),
    });

    Router::new()
        .route("/health", get(health))
        .route("/model", get(model))
        .route("/features", post(features))
        .route("/predict", post(predict))
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// Describe the classifier
async fn model(State(state): State<Arc<AppState>>) -> Json<ModelResponse> {
    Json(ModelResponse {
        features: FeatureIndex::ALL.iter().map(|i| i.name()).collect(),
        weights: state.perceptron.weights().to_vec(),
        bias: state.perceptron.bias(),
    })
}

/// Extract features
async fn features(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FeaturesRequest>,
) -> Result<Json<FeaturesResponse>, ApiError> {
    let now = req.now.unwrap_or_else(Utc::now);
    let features = state.extractor.extract(&req.context, now)?;
    Ok(Json(FeaturesResponse { features }))
}

/// Classify features
async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let confidence = state.perceptron.predict(&req.features)?;
    Ok(Json(PredictResponse {
        confidence,
        transport_score: Perceptron::to_transport_score(confidence),
    }))
}

/// Run the API server
pub async fn run_server(
    addr: &str,
    perceptron: Perceptron,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router_with(perceptron);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("pulse API listening on {}", addr);
    println!("🫀 Pulse API running on {}", addr);
    println!("  GET  /health    - Health check");
    println!("  GET  /model     - Classifier weights");
    println!("  POST /features  - Extract feature vector");
    println!("  POST /predict   - Score a feature vector");
    axum::serve(listener, router).await?;
    Ok(())
}
