//! Perceptron: fixed-weight linear classifier with a logistic squash
//!
//! z = bias + Σ wᵢ·xᵢ, confidence = 1 / (1 + e^-z).
//! Not trainable. Weights are injected once and never change.

use crate::{FEATURE_COUNT, TRANSPORT_SCALE, MAX_TRANSPORT_SCORE, LivenessError, Result};
use crate::types::{ClassifierWeights, FeatureVector};

/// Liveness classifier
#[derive(Debug, Clone, Default)]
pub struct Perceptron {
    weights: ClassifierWeights,
}

impl Perceptron {
    /// Create classifier with built-in weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Create classifier from validated weights
    pub fn from_weights(weights: ClassifierWeights) -> Self {
        Self { weights }
    }

    /// Create classifier from raw weights, length checked here
    pub fn with_weights(weights: &[f64], bias: f64) -> Result<Self> {
        Ok(Self::from_weights(ClassifierWeights::new(weights, bias)?))
    }

    /// Pre-sigmoid activation
    pub fn logit(&self, features: &[f64]) -> Result<f64> {
        if features.len() != FEATURE_COUNT {
            return Err(LivenessError::FeatureCount {
                expected: FEATURE_COUNT,
                actual: features.len(),
            });
        }

        let z = self
            .weights
            .weights()
            .iter()
            .zip(features)
            .fold(self.weights.bias(), |acc, (w, x)| acc + w * x);
        Ok(z)
    }

    /// Confidence in (0, 1)
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        Ok(sigmoid(self.logit(features)?))
    }

    /// Predict on an already-validated vector
    pub fn predict_vector(&self, features: &FeatureVector) -> Result<f64> {
        self.predict(features.as_slice())
    }

    /// Confidence → integer score in [0, 10000], rounding half away from zero
    pub fn to_transport_score(confidence: f64) -> u32 {
        if confidence.is_nan() {
            return 0;
        }
        let scaled = (confidence * TRANSPORT_SCALE).round();
        scaled.clamp(0.0, MAX_TRANSPORT_SCORE as f64) as u32
    }

    pub fn weights(&self) -> &[f64; FEATURE_COUNT] {
        self.weights.weights()
    }

    pub fn bias(&self) -> f64 {
        self.weights.bias()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

// =============================================================================
// TESTS
// =============================================================================
