//! Feature extractor: authentication context → 10-slot feature vector
//!
//! Measured slots:
//! - fingerprint_frequency: 0.9 on pass, 0.1 on fail (never jittered)
//! - days_since_last_verify: exp(-days / 7), or 0.1 when never verified
//!
//! The other eight slots are synthetic baselines with uniform ±0.05 jitter,
//! so repeated extractions from identical inputs do not score identically.

use chrono::{DateTime, Utc};
use rand::Rng;
use crate::{
    FINGERPRINT_SIGNAL_PASS, FINGERPRINT_SIGNAL_FAIL,
    RECENCY_HALF_LIFE_DAYS, NEVER_VERIFIED_RECENCY, SYNTHETIC_JITTER,
    BASELINE_FACE_MATCH, BASELINE_FACE_LIVENESS, BASELINE_FINGERPRINT_CONSISTENCY,
    BASELINE_TIME_OF_DAY, BASELINE_TYPING_PATTERN, BASELINE_APP_USAGE,
    BASELINE_MOVEMENT_PATTERN, BASELINE_SESSION_BEHAVIOR,
    Result,
};
use crate::types::{FeatureContext, FeatureIndex, FeatureVector};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Stateless feature extractor
#[derive(Debug, Default, Clone, Copy)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract using the thread-local entropy source
    pub fn extract(&self, context: &FeatureContext, now: DateTime<Utc>) -> Result<FeatureVector> {
        self.extract_with_rng(context, now, &mut rand::thread_rng())
    }

    /// Extract with a caller-supplied RNG (seeded in tests)
    pub fn extract_with_rng<R: Rng>(
        &self,
        context: &FeatureContext,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<FeatureVector> {
        let values: Vec<f64> = FeatureIndex::ALL
            .iter()
            .map(|idx| match idx {
                FeatureIndex::FingerprintFrequency => {
                    fingerprint_signal(context.authentication_succeeded)
                }
                FeatureIndex::DaysSinceLastVerify => recency_signal(context.last_verified_at, now),
                synthetic => vary(synthetic_baseline(*synthetic), &mut *rng),
            })
            .collect();

        // Length and range are re-checked here, not assumed
        let vector = FeatureVector::new(values)?;
        log::debug!("extracted features: {:?}", vector.as_slice());
        Ok(vector)
    }
}

/// Hard binary → scalar mapping
pub fn fingerprint_signal(succeeded: bool) -> f64 {
    if succeeded {
        FINGERPRINT_SIGNAL_PASS
    } else {
        FINGERPRINT_SIGNAL_FAIL
    }
}

/// Exponential decay since last verification.
/// A timestamp in the future counts as zero elapsed days.
pub fn recency_signal(last_verified_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(last) = last_verified_at else {
        return NEVER_VERIFIED_RECENCY;
    };
    let days = ((now - last).num_milliseconds() as f64 / MS_PER_DAY).max(0.0);
    (-days / RECENCY_HALF_LIFE_DAYS).exp().clamp(0.0, 1.0)
}

/// Baseline for an unmeasured slot
pub fn synthetic_baseline(index: FeatureIndex) -> f64 {
    match index {
        FeatureIndex::FaceMatch => BASELINE_FACE_MATCH,
        FeatureIndex::FaceLiveness => BASELINE_FACE_LIVENESS,
        FeatureIndex::FingerprintConsistency => BASELINE_FINGERPRINT_CONSISTENCY,
        FeatureIndex::TimeOfDayNormality => BASELINE_TIME_OF_DAY,
        FeatureIndex::TypingPatternMatch => BASELINE_TYPING_PATTERN,
        FeatureIndex::AppUsageMatch => BASELINE_APP_USAGE,
        FeatureIndex::MovementPatternMatch => BASELINE_MOVEMENT_PATTERN,
        FeatureIndex::SessionBehavior => BASELINE_SESSION_BEHAVIOR,
        // Measured slots have no baseline
        FeatureIndex::FingerprintFrequency | FeatureIndex::DaysSinceLastVerify => 0.0,
    }
}

/// Uniform ±0.05 offset, clamped to [0, 1]
fn vary<R: Rng>(base: f64, rng: &mut R) -> f64 {
    let offset = rng.gen_range(-SYNTHETIC_JITTER..=SYNTHETIC_JITTER);
    (base + offset).clamp(0.0, 1.0)
}

// =============================================================================
// TESTS
// =============================================================================
