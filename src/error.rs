//! Error types for the verification pipeline
//!
//! Only defects and bad configuration are errors. Runtime outcomes
//! (no sensor, rejected prompt) are data on `VerificationResult`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LivenessError {
    #[error("Expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("Expected {expected} weights, got {actual}")]
    WeightCount { expected: usize, actual: usize },

    #[error("Feature {index} out of range [0, 1]: {value}")]
    FeatureOutOfRange { index: usize, value: f64 },

    #[error("Weight {index} is not a finite number")]
    NonFiniteWeight { index: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LivenessError>;
