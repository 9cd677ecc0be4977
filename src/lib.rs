//! Pulse liveness: proof-of-life verification pipeline
//!
//! Biometric prompt → feature extraction → perceptron → liveness score.
//! The score is consumed by a remote custody vault; submission is external.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use error::{LivenessError, Result};

// =============================================================================
// FEATURE LAYOUT
// =============================================================================

/// Length of every feature vector and weight vector
pub const FEATURE_COUNT: usize = 10;

/// Fingerprint signal when the biometric prompt succeeded
pub const FINGERPRINT_SIGNAL_PASS: f64 = 0.9;

/// Fingerprint signal when the biometric prompt failed
pub const FINGERPRINT_SIGNAL_FAIL: f64 = 0.1;

/// Recency decay half-life constant (days)
pub const RECENCY_HALF_LIFE_DAYS: f64 = 7.0;

/// Recency value when there is no previous verification.
/// Not the floor of the decay curve: "no data" is not "long absence".
pub const NEVER_VERIFIED_RECENCY: f64 = 0.1;

/// Amplitude of the uniform jitter applied to synthetic features
pub const SYNTHETIC_JITTER: f64 = 0.05;

// =============================================================================
// SYNTHETIC BASELINES - "alive user" defaults for unmeasured signals
// =============================================================================

pub const BASELINE_FACE_MATCH: f64 = 0.85;
pub const BASELINE_FACE_LIVENESS: f64 = 0.80;
pub const BASELINE_FINGERPRINT_CONSISTENCY: f64 = 0.70;
pub const BASELINE_TIME_OF_DAY: f64 = 0.75;
pub const BASELINE_TYPING_PATTERN: f64 = 0.50;
pub const BASELINE_APP_USAGE: f64 = 0.50;
pub const BASELINE_MOVEMENT_PATTERN: f64 = 0.50;
pub const BASELINE_SESSION_BEHAVIOR: f64 = 0.60;

// =============================================================================
// PERCEPTRON [C] - Demo-tuned weights
// Active profile → ~0.85, inactive profile → ~0.05-0.15
// Importance: face > fingerprint > time > patterns
// =============================================================================

pub const DEFAULT_WEIGHTS: [f64; FEATURE_COUNT] = [
    1.75, // face_match_score
    1.40, // face_liveness_score
    0.70, // fingerprint_frequency
    0.70, // fingerprint_consistency
    0.56, // time_of_day_normality
    0.49, // typing_pattern_match
    0.35, // app_usage_match
    0.35, // movement_pattern_match
    0.35, // days_since_last_verify
    0.35, // session_behavior
];

pub const DEFAULT_BIAS: f64 = -3.5;

/// Confidence → transport score multiplier (0.00% - 100.00%)
pub const TRANSPORT_SCALE: f64 = 10_000.0;

/// Highest transport score
pub const MAX_TRANSPORT_SCORE: u32 = 10_000;

// =============================================================================
// INVOCATION TAGS - read by the backend to pick a scoring policy
// =============================================================================

pub const TAG_MOBILE_BIOMETRIC: &str = "mobile_biometric";
pub const TAG_EMERGENCY_CHECKIN: &str = "emergency_checkin";
pub const TAG_BIOMETRIC_UNAVAILABLE: &str = "biometric_unavailable";
pub const TAG_BIOMETRIC_FAILED: &str = "biometric_failed";

/// Message shown in the platform biometric prompt
pub const DEFAULT_PROMPT: &str = "Pulse Protocol - Verify you are alive";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
